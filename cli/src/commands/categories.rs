use allerscan_core::domain::ingestion::value_objects::available_categories;

pub fn run() {
    for (slug, display_name) in available_categories() {
        println!("{slug:<24} {display_name}");
    }
}
