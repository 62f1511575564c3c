//! # Entity forms: editable text state and the payloads it turns into
//!
//! Each create/edit screen binds its inputs to one of the form structs here.
//! Every field is kept as the text the user typed. [`EntityForm::payload`]
//! validates and converts in one step, returning per-field messages on
//! failure, so nothing reaches the backend unless the whole form is valid.
//!
//! | Form | Payload | Image field |
//! |------|---------|-------------|
//! | [`PropertyForm`] | [`PropertyPayload`] | `hero_image_url` |
//! | [`VendorForm`] | [`VendorPayload`] | none |
//! | [`UpsellForm`] | [`UpsellPayload`] | `image_url` |
//!
//! [`ApiClient::submit`] runs the full flow: validate, upload a newly chosen
//! image first (its URL replaces the stored one), then POST or PUT.

use serde::Serialize;
use store::{PaymentProcessor, PayoutSchedule, Property, Upsell, Vendor};

use crate::auth::looks_like_email;
use crate::client::ApiClient;
use crate::error::{ApiError, FieldErrors, Result};
use crate::resource::Resource;
use crate::transport::Transport;
use crate::upload::ImageUpload;

pub const UPSELL_CATEGORIES: [&str; 7] = [
    "transport",
    "food",
    "experience",
    "wellness",
    "housekeeping",
    "equipment",
    "other",
];

pub const VENDOR_SERVICE_TYPES: [&str; 7] = [
    "chef",
    "driver",
    "spa",
    "guide",
    "cleaning",
    "rental",
    "other",
];

pub trait EntityForm: Clone {
    type Entity: Resource;
    type Payload: Serialize;

    fn from_entity(entity: &Self::Entity) -> Self;

    /// Validate and convert, or report every problem at once.
    fn payload(&self) -> std::result::Result<Self::Payload, FieldErrors>;

    /// Field holding an uploaded image URL, for forms that have one.
    fn image_url_mut(&mut self) -> Option<&mut String> {
        None
    }
}

fn optional(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

fn require(errors: &mut FieldErrors, field: &str, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.insert(field.to_string(), message.to_string());
    }
}

fn finish<P>(errors: FieldErrors, payload: impl FnOnce() -> P) -> std::result::Result<P, FieldErrors> {
    if errors.is_empty() {
        Ok(payload())
    } else {
        Err(errors)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyForm {
    pub name: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub locale: String,
    pub currency: String,
    pub hero_image_url: String,
    pub payment_processor: PaymentProcessor,
    pub stripe_account_id: String,
    pub wise_account_holder: String,
    pub wise_iban: String,
    pub wise_email: String,
    pub payout_schedule: PayoutSchedule,
    pub is_active: bool,
}

impl Default for PropertyForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            address: String::new(),
            city: String::new(),
            country: String::new(),
            locale: "en".to_string(),
            currency: "EUR".to_string(),
            hero_image_url: String::new(),
            payment_processor: PaymentProcessor::default(),
            stripe_account_id: String::new(),
            wise_account_holder: String::new(),
            wise_iban: String::new(),
            wise_email: String::new(),
            payout_schedule: PayoutSchedule::default(),
            is_active: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyPayload {
    pub name: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub locale: String,
    pub currency: String,
    pub hero_image_url: Option<String>,
    pub payment_processor: PaymentProcessor,
    pub stripe_account_id: Option<String>,
    pub wise_account_holder: Option<String>,
    pub wise_iban: Option<String>,
    pub wise_email: Option<String>,
    pub payout_schedule: PayoutSchedule,
    pub is_active: bool,
}

impl EntityForm for PropertyForm {
    type Entity = Property;
    type Payload = PropertyPayload;

    fn from_entity(p: &Property) -> Self {
        Self {
            name: p.name.clone(),
            address: p.address.clone().unwrap_or_default(),
            city: p.city.clone().unwrap_or_default(),
            country: p.country.clone().unwrap_or_default(),
            locale: p.locale.clone(),
            currency: p.currency.clone(),
            hero_image_url: p.hero_image_url.clone().unwrap_or_default(),
            payment_processor: p.payment_processor,
            stripe_account_id: p.stripe_account_id.clone().unwrap_or_default(),
            wise_account_holder: p.wise_account_holder.clone().unwrap_or_default(),
            wise_iban: p.wise_iban.clone().unwrap_or_default(),
            wise_email: p.wise_email.clone().unwrap_or_default(),
            payout_schedule: p.payout_schedule,
            is_active: p.is_active,
        }
    }

    fn payload(&self) -> std::result::Result<PropertyPayload, FieldErrors> {
        let mut errors = FieldErrors::new();
        require(&mut errors, "name", &self.name, "Name is required.");

        let currency = self.currency.trim().to_ascii_uppercase();
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
            errors.insert("currency".into(), "Use a three-letter currency code.".into());
        }
        require(&mut errors, "locale", &self.locale, "Locale is required.");

        if self.payment_processor == PaymentProcessor::Wise {
            require(
                &mut errors,
                "wise_account_holder",
                &self.wise_account_holder,
                "Account holder is required for Wise payouts.",
            );
            require(&mut errors, "wise_iban", &self.wise_iban, "IBAN is required for Wise payouts.");
            if !self.wise_email.trim().is_empty() && !looks_like_email(&self.wise_email) {
                errors.insert("wise_email".into(), "Enter a valid email address.".into());
            }
        }

        finish(errors, || PropertyPayload {
            name: self.name.trim().to_string(),
            address: optional(&self.address),
            city: optional(&self.city),
            country: optional(&self.country),
            locale: self.locale.trim().to_string(),
            currency,
            hero_image_url: optional(&self.hero_image_url),
            payment_processor: self.payment_processor,
            stripe_account_id: optional(&self.stripe_account_id),
            wise_account_holder: optional(&self.wise_account_holder),
            wise_iban: optional(&self.wise_iban).map(|iban| iban.replace(' ', "").to_ascii_uppercase()),
            wise_email: optional(&self.wise_email),
            payout_schedule: self.payout_schedule,
            is_active: self.is_active,
        })
    }

    fn image_url_mut(&mut self) -> Option<&mut String> {
        Some(&mut self.hero_image_url)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VendorForm {
    pub name: String,
    pub service_type: String,
    pub email: String,
    pub phone: String,
    pub whatsapp: String,
    pub notes: String,
    pub is_active: bool,
}

impl Default for VendorForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            service_type: String::new(),
            email: String::new(),
            phone: String::new(),
            whatsapp: String::new(),
            notes: String::new(),
            is_active: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VendorPayload {
    pub name: String,
    pub service_type: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub whatsapp: Option<String>,
    pub notes: Option<String>,
    pub is_active: bool,
}

impl EntityForm for VendorForm {
    type Entity = Vendor;
    type Payload = VendorPayload;

    fn from_entity(v: &Vendor) -> Self {
        Self {
            name: v.name.clone(),
            service_type: v.service_type.clone(),
            email: v.email.clone().unwrap_or_default(),
            phone: v.phone.clone().unwrap_or_default(),
            whatsapp: v.whatsapp.clone().unwrap_or_default(),
            notes: v.notes.clone().unwrap_or_default(),
            is_active: v.is_active,
        }
    }

    fn payload(&self) -> std::result::Result<VendorPayload, FieldErrors> {
        let mut errors = FieldErrors::new();
        require(&mut errors, "name", &self.name, "Name is required.");
        require(&mut errors, "service_type", &self.service_type, "Service type is required.");
        if !self.email.trim().is_empty() && !looks_like_email(&self.email) {
            errors.insert("email".into(), "Enter a valid email address.".into());
        }
        if [&self.email, &self.phone, &self.whatsapp]
            .iter()
            .all(|s| s.trim().is_empty())
        {
            errors
                .entry("email".into())
                .or_insert_with(|| "Provide an email, phone or WhatsApp contact.".into());
        }

        finish(errors, || VendorPayload {
            name: self.name.trim().to_string(),
            service_type: self.service_type.trim().to_string(),
            email: optional(&self.email),
            phone: optional(&self.phone),
            whatsapp: optional(&self.whatsapp),
            notes: optional(&self.notes),
            is_active: self.is_active,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpsellForm {
    pub property_id: Option<i64>,
    pub vendor_id: Option<i64>,
    pub secondary_vendor_id: Option<i64>,
    pub title: String,
    pub description: String,
    pub price: String,
    pub category: String,
    pub image_url: String,
    pub availability_rules: serde_json::Value,
    pub sort_order: String,
    pub is_active: bool,
}

impl Default for UpsellForm {
    fn default() -> Self {
        Self {
            property_id: None,
            vendor_id: None,
            secondary_vendor_id: None,
            title: String::new(),
            description: String::new(),
            price: String::new(),
            category: UPSELL_CATEGORIES[0].to_string(),
            image_url: String::new(),
            availability_rules: serde_json::Value::Null,
            sort_order: "0".to_string(),
            is_active: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpsellPayload {
    pub property_id: i64,
    pub vendor_id: i64,
    pub secondary_vendor_id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: String,
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "serde_json::Value::is_null")]
    pub availability_rules: serde_json::Value,
    pub sort_order: i32,
    pub is_active: bool,
}

impl EntityForm for UpsellForm {
    type Entity = Upsell;
    type Payload = UpsellPayload;

    fn from_entity(u: &Upsell) -> Self {
        Self {
            property_id: Some(u.property_id),
            vendor_id: Some(u.vendor_id),
            secondary_vendor_id: u.secondary_vendor_id,
            title: u.title.clone(),
            description: u.description.clone().unwrap_or_default(),
            price: format!("{:.2}", u.price),
            category: u.category.clone(),
            image_url: u.image_url.clone().unwrap_or_default(),
            availability_rules: u.availability_rules.clone(),
            sort_order: u.sort_order.to_string(),
            is_active: u.is_active,
        }
    }

    fn payload(&self) -> std::result::Result<UpsellPayload, FieldErrors> {
        let mut errors = FieldErrors::new();
        require(&mut errors, "title", &self.title, "Title is required.");
        require(&mut errors, "category", &self.category, "Category is required.");
        if self.property_id.is_none() {
            errors.insert("property_id".into(), "Choose a property.".into());
        }
        if self.vendor_id.is_none() {
            errors.insert("vendor_id".into(), "Choose a vendor.".into());
        }
        if self.secondary_vendor_id.is_some() && self.secondary_vendor_id == self.vendor_id {
            errors.insert(
                "secondary_vendor_id".into(),
                "Backup vendor must differ from the main vendor.".into(),
            );
        }

        let price = match self.price.trim().replace(',', ".").parse::<f64>() {
            Ok(p) if p.is_finite() && p >= 0.0 => p,
            _ => {
                errors.insert("price".into(), "Enter a price of 0 or more.".into());
                0.0
            }
        };
        let sort_order = if self.sort_order.trim().is_empty() {
            0
        } else {
            self.sort_order.trim().parse::<i32>().unwrap_or_else(|_| {
                errors.insert("sort_order".into(), "Sort order must be a whole number.".into());
                0
            })
        };

        let (Some(property_id), Some(vendor_id)) = (self.property_id, self.vendor_id) else {
            return Err(errors);
        };
        finish(errors, || UpsellPayload {
            property_id,
            vendor_id,
            secondary_vendor_id: self.secondary_vendor_id,
            title: self.title.trim().to_string(),
            description: optional(&self.description),
            price,
            category: self.category.trim().to_string(),
            image_url: optional(&self.image_url),
            availability_rules: self.availability_rules.clone(),
            sort_order,
            is_active: self.is_active,
        })
    }

    fn image_url_mut(&mut self) -> Option<&mut String> {
        Some(&mut self.image_url)
    }
}

impl<T: Transport> ApiClient<T> {
    /// Validate `form`, upload `image` if one was chosen, then create
    /// (`id == None`) or update the entity.
    pub async fn submit<F: EntityForm>(
        &self,
        id: Option<i64>,
        form: &F,
        image: Option<ImageUpload>,
    ) -> Result<F::Entity> {
        form.payload().map_err(ApiError::invalid)?;

        let mut form = form.clone();
        if let Some(url) = form.image_url_mut() {
            let existing = std::mem::take(url);
            *url = self.resolve_image_url(image, existing).await?;
        }
        let payload = form.payload().map_err(ApiError::invalid)?;
        self.save::<F::Entity, _>(id, &payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{json_response, property_json, MockTransport};
    use crate::transport::Method;
    use serde_json::json;

    fn valid_upsell() -> UpsellForm {
        UpsellForm {
            property_id: Some(1),
            vendor_id: Some(2),
            title: "Airport transfer".into(),
            price: "45,50".into(),
            ..UpsellForm::default()
        }
    }

    #[test]
    fn test_property_requires_name_and_wise_details() {
        let form = PropertyForm {
            payment_processor: PaymentProcessor::Wise,
            currency: "EURO".into(),
            ..PropertyForm::default()
        };
        let errors = form.payload().unwrap_err();
        assert!(errors.contains_key("name"));
        assert!(errors.contains_key("currency"));
        assert!(errors.contains_key("wise_account_holder"));
        assert!(errors.contains_key("wise_iban"));
    }

    #[test]
    fn test_property_payload_normalises_fields() {
        let form = PropertyForm {
            name: " Villa Sari ".into(),
            currency: "usd".into(),
            city: "  ".into(),
            payment_processor: PaymentProcessor::Wise,
            wise_account_holder: "Sari Ltd".into(),
            wise_iban: "de89 3704 0044".into(),
            ..PropertyForm::default()
        };
        let payload = form.payload().unwrap();
        assert_eq!(payload.name, "Villa Sari");
        assert_eq!(payload.currency, "USD");
        assert_eq!(payload.city, None);
        assert_eq!(payload.wise_iban.as_deref(), Some("DE8937040044"));
    }

    #[test]
    fn test_vendor_needs_a_contact_channel() {
        let form = VendorForm {
            name: "Made".into(),
            service_type: "driver".into(),
            ..VendorForm::default()
        };
        assert!(form.payload().unwrap_err().contains_key("email"));

        let form = VendorForm {
            whatsapp: "+62 812".into(),
            ..form
        };
        assert_eq!(form.payload().unwrap().whatsapp.as_deref(), Some("+62 812"));
    }

    #[test]
    fn test_upsell_validation() {
        let payload = valid_upsell().payload().unwrap();
        assert_eq!(payload.price, 45.5);
        assert_eq!(payload.sort_order, 0);

        let form = UpsellForm {
            price: "-1".into(),
            secondary_vendor_id: Some(2),
            sort_order: "first".into(),
            ..valid_upsell()
        };
        let errors = form.payload().unwrap_err();
        assert!(errors.contains_key("price"));
        assert!(errors.contains_key("secondary_vendor_id"));
        assert!(errors.contains_key("sort_order"));

        let errors = UpsellForm::default().payload().unwrap_err();
        assert!(errors.contains_key("property_id"));
        assert!(errors.contains_key("vendor_id"));
        assert!(errors.contains_key("title"));
    }

    #[test]
    fn test_edit_form_roundtrips_entity() {
        let property: Property = serde_json::from_value(property_json(3, "Villa Sari")).unwrap();
        let form = PropertyForm::from_entity(&property);
        assert_eq!(form.city, "Ubud");
        assert_eq!(form.payload().unwrap().name, "Villa Sari");
    }

    #[tokio::test]
    async fn test_submit_invalid_form_sends_nothing() {
        let mock = MockTransport::new(|_| json_response(200, json!({})));
        let client = ApiClient::with_transport(mock.clone());
        let err = client
            .submit(None, &PropertyForm::default(), Some(ImageUpload::new("a.png", vec![1])))
            .await
            .unwrap_err();
        assert!(err.field_errors().contains_key("name"));
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_submit_uploads_image_before_saving() {
        let mock = MockTransport::new(|req| match req.path.as_str() {
            "/upload" => json_response(200, json!({"url": "https://cdn.example/hero.jpg"})),
            _ => json_response(200, property_json(5, "Villa Sari")),
        });
        let client = ApiClient::with_transport(mock.clone());
        let form = PropertyForm {
            name: "Villa Sari".into(),
            hero_image_url: "https://cdn.example/old.jpg".into(),
            ..PropertyForm::default()
        };

        client
            .submit(Some(5), &form, Some(ImageUpload::new("hero.jpg", vec![9])))
            .await
            .unwrap();

        let requests = mock.requests();
        assert_eq!(requests[0].path, "/upload");
        assert_eq!((requests[1].method, requests[1].path.as_str()), (Method::Put, "/properties/5"));
        assert_eq!(
            requests[1].json().unwrap()["hero_image_url"],
            "https://cdn.example/hero.jpg"
        );
    }

    #[tokio::test]
    async fn test_submit_without_new_image_keeps_existing_url() {
        let mock = MockTransport::new(|_| json_response(201, property_json(6, "Villa Sari")));
        let client = ApiClient::with_transport(mock.clone());
        let form = PropertyForm {
            name: "Villa Sari".into(),
            hero_image_url: "https://cdn.example/old.jpg".into(),
            ..PropertyForm::default()
        };

        client.submit(None, &form, None).await.unwrap();

        let requests = mock.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].json().unwrap()["hero_image_url"], "https://cdn.example/old.jpg");
    }

    #[tokio::test]
    async fn test_failed_upload_aborts_submit() {
        let mock = MockTransport::new(|_| json_response(500, json!({"message": "Storage full"})));
        let client = ApiClient::with_transport(mock.clone());
        let err = client
            .submit(None, &valid_upsell(), Some(ImageUpload::new("x.png", vec![1])))
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Storage full");
        assert_eq!(mock.requests().len(), 1);
    }
}
