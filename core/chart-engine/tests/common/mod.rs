//! FILENAME: tests/common/mod.rs
//! Fixtures for chart engine integration tests.

#![allow(dead_code)]

use engine::{Table, TransactionRecord};

/// Builder for one transaction with sensible defaults.
pub struct RecordFixture {
    record: TransactionRecord,
}

impl RecordFixture {
    pub fn new(customer_id: &str, purchase_amount: f64) -> Self {
        let mut record = TransactionRecord::new(customer_id, purchase_amount);
        record.age = 35;
        record.age_group = "Adult".to_string();
        record.gender = "Male".to_string();
        record.item_purchased = "Blouse".to_string();
        record.category = "Clothing".to_string();
        record.location = "Kentucky".to_string();
        record.size = "M".to_string();
        record.color = "Gray".to_string();
        record.season = "Winter".to_string();
        record.review_rating = 3.5;
        record.subscription_status = "No".to_string();
        record.shipping_type = "Express".to_string();
        record.discount_applied = "No".to_string();
        record.previous_purchases = 10;
        record.payment_method = "Venmo".to_string();
        record.frequency_of_purchases = "Monthly".to_string();
        record.purchase_frequency_days = 30;
        RecordFixture { record }
    }

    pub fn age(mut self, age: u32, group: &str) -> Self {
        self.record.age = age;
        self.record.age_group = group.to_string();
        self
    }

    pub fn gender(mut self, gender: &str) -> Self {
        self.record.gender = gender.to_string();
        self
    }

    pub fn item(mut self, item: &str, category: &str) -> Self {
        self.record.item_purchased = item.to_string();
        self.record.category = category.to_string();
        self
    }

    pub fn location(mut self, location: &str) -> Self {
        self.record.location = location.to_string();
        self
    }

    pub fn color(mut self, color: &str) -> Self {
        self.record.color = color.to_string();
        self
    }

    pub fn season(mut self, season: &str) -> Self {
        self.record.season = season.to_string();
        self
    }

    pub fn rating(mut self, rating: f64) -> Self {
        self.record.review_rating = rating;
        self
    }

    pub fn subscribed(mut self, yes: bool) -> Self {
        self.record.subscription_status = if yes { "Yes" } else { "No" }.to_string();
        self
    }

    pub fn shipping(mut self, shipping: &str) -> Self {
        self.record.shipping_type = shipping.to_string();
        self
    }

    pub fn previous(mut self, previous: u32) -> Self {
        self.record.previous_purchases = previous;
        self
    }

    pub fn frequency(mut self, label: &str, days: u32) -> Self {
        self.record.frequency_of_purchases = label.to_string();
        self.record.purchase_frequency_days = days;
        self
    }

    pub fn build(self) -> TransactionRecord {
        self.record
    }
}

/// Twelve transactions spread over every filter field.
pub fn sample_table() -> Table {
    Table::new(vec![
        RecordFixture::new("1", 53.0).age(55, "Middle-aged").item("Blouse", "Clothing").location("Kentucky").rating(3.1).subscribed(true).previous(14).season("Winter").frequency("Fortnightly", 14).build(),
        RecordFixture::new("2", 64.0).age(19, "Young Adult").item("Sweater", "Clothing").location("Maine").rating(3.1).subscribed(true).previous(2).season("Winter").color("Maroon").frequency("Fortnightly", 14).build(),
        RecordFixture::new("3", 73.0).age(50, "Middle-aged").item("Jeans", "Clothing").location("Massachusetts").rating(3.1).subscribed(true).previous(23).season("Spring").color("Maroon").shipping("Free Shipping").frequency("Weekly", 7).build(),
        RecordFixture::new("4", 90.0).age(21, "Young Adult").gender("Female").item("Sandals", "Footwear").location("Rhode Island").rating(3.5).previous(49).season("Spring").shipping("Next Day Air").frequency("Weekly", 7).build(),
        RecordFixture::new("5", 49.0).age(45, "Adult").item("Blouse", "Clothing").location("Oregon").rating(2.7).previous(31).season("Spring").color("Turquoise").shipping("Free Shipping").frequency("Annually", 365).build(),
        RecordFixture::new("6", 20.0).age(46, "Adult").gender("Female").item("Sneakers", "Footwear").location("Wyoming").rating(2.9).previous(14).season("Summer").color("White").shipping("Standard").frequency("Weekly", 7).build(),
        RecordFixture::new("7", 85.0).age(63, "Senior").item("Shirt", "Clothing").location("Montana").rating(3.2).subscribed(true).previous(49).season("Fall").color("Gray").shipping("Free Shipping").frequency("Quarterly", 90).build(),
        RecordFixture::new("8", 34.0).age(27, "Adult").gender("Female").item("Shorts", "Clothing").location("Louisiana").rating(3.2).previous(19).season("Winter").color("Charcoal").shipping("Free Shipping").frequency("Weekly", 7).build(),
        RecordFixture::new("9", 97.0).age(26, "Adult").item("Coat", "Outerwear").location("West Virginia").rating(2.6).previous(8).season("Summer").color("Silver").shipping("Express").frequency("Annually", 365).build(),
        RecordFixture::new("10", 31.0).age(57, "Middle-aged").gender("Female").item("Handbag", "Accessories").location("Missouri").rating(4.8).subscribed(true).previous(4).season("Spring").color("Pink").shipping("2-Day Shipping").frequency("Quarterly", 90).build(),
        RecordFixture::new("1", 34.0).age(55, "Middle-aged").item("Shoes", "Footwear").location("Kentucky").rating(4.1).subscribed(true).previous(26).season("Fall").color("Gray").shipping("Store Pickup").frequency("Bi-Weekly", 14).build(),
        RecordFixture::new("12", 68.0).age(66, "Senior").gender("Female").item("Shorts", "Clothing").location("Maine").rating(4.9).previous(1).season("Summer").color("White").shipping("Standard").frequency("Quarterly", 90).build(),
    ])
}

/// Four rows with amounts [10, 20, 30, 40]; customer "A" appears twice.
pub fn four_row_table() -> Table {
    Table::new(vec![
        RecordFixture::new("A", 10.0).build(),
        RecordFixture::new("A", 20.0).build(),
        RecordFixture::new("B", 30.0).build(),
        RecordFixture::new("C", 40.0).build(),
    ])
}
