//! Client-side substring search over loaded collections.
//!
//! A record matches when the query is a case-insensitive substring of at least
//! one of its searchable fields. An empty or whitespace-only query matches
//! everything.

use crate::models::{Order, Property, Upsell, Vendor};

/// Records that expose text fields to the list search box.
pub trait Searchable {
    fn search_fields(&self) -> Vec<&str>;
}

impl Searchable for Property {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.address.as_deref().unwrap_or(""),
            self.city.as_deref().unwrap_or(""),
        ]
    }
}

impl Searchable for Vendor {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.email.as_deref().unwrap_or(""),
            self.service_type.as_str(),
        ]
    }
}

impl Searchable for Upsell {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.title.as_str(),
            self.category.as_str(),
            self.description.as_deref().unwrap_or(""),
        ]
    }
}

impl Searchable for Order {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.guest_name.as_str(),
            self.guest_email.as_str(),
            self.upsell_title(),
            self.property_name(),
            self.vendor_name(),
        ]
    }
}

/// Does `item` match `query`? The query is a plain case-insensitive
/// substring, surrounding whitespace included.
pub fn matches<T: Searchable>(item: &T, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    item.search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Keep the items matching `query`, preserving their order.
pub fn filter<'a, T: Searchable>(items: &'a [T], query: &str) -> Vec<&'a T> {
    items.iter().filter(|item| matches(*item, query)).collect()
}
