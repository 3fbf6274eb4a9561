//! Quotation requests
//!
//! A request is the structured set of business-setup requirements captured
//! by the form layer. Field-level checks (presence, formats) happen before a
//! request reaches the engine; the resolver still re-checks the structural
//! invariants (activity cardinality, headcount ranges).

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::error::ValidationError;

/// Allowed shareholder headcount
pub const SHAREHOLDER_RANGE: RangeInclusive<u32> = 1..=6;

/// Allowed visa count
pub const VISA_RANGE: RangeInclusive<u32> = 0..=15;

/// Request fields that validation can point at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestField {
    JurisdictionType,
    Emirate,
    Activities,
    OfficeSpace,
    Shareholders,
    Visas,
    Contact,
}

impl RequestField {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestField::JurisdictionType => "jurisdiction_type",
            RequestField::Emirate => "emirate",
            RequestField::Activities => "activities",
            RequestField::OfficeSpace => "office_space",
            RequestField::Shareholders => "shareholders",
            RequestField::Visas => "visas",
            RequestField::Contact => "contact",
        }
    }
}

impl fmt::Display for RequestField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declares a closed enumeration carried as a display label.
///
/// Labels are what the form submits; parsing is case-insensitive and also
/// accepts the listed aliases and the lowercase slug used in rule ids.
macro_rules! labelled_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $field:expr, {
            $( $(#[$vmeta:meta])* $variant:ident => $label:literal $(| $alias:literal)* ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every value, in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Label as submitted by the form
            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }

            /// Lowercase, hyphenated form used inside rule ids
            pub fn slug(&self) -> String {
                self.label().to_ascii_lowercase().replace(' ', "-")
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                $(
                    if wanted.eq_ignore_ascii_case($label)
                        $(|| wanted.eq_ignore_ascii_case($alias))*
                    {
                        return Ok($name::$variant);
                    }
                )+
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.slug().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| {
                        ValidationError::new($field, format!("unknown value '{}'", wanted))
                    })
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.label())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

labelled_enum! {
    /// Legal regime governing incorporation
    JurisdictionType, RequestField::JurisdictionType, {
        Freezone => "Freezone" | "Free Zone",
        Mainland => "Mainland",
    }
}

labelled_enum! {
    /// The seven emirates
    Emirate, RequestField::Emirate, {
        Dubai => "Dubai",
        AbuDhabi => "Abu Dhabi",
        Sharjah => "Sharjah",
        Ajman => "Ajman",
        RasAlKhaimah => "RAK" | "Ras Al Khaimah",
        Fujairah => "Fujairah",
        UmmAlQuwain => "Umm Al Quwain",
    }
}

labelled_enum! {
    /// Licensed business-activity classes, each priced independently
    ActivityCategory, RequestField::Activities, {
        Trading => "Trading",
        Manufacturing => "Manufacturing",
        ServicesOrConsultancy => "Services or Consultancy",
    }
}

labelled_enum! {
    /// Whether the company needs dedicated office space
    OfficeSpace, RequestField::OfficeSpace, {
        Yes => "Yes",
        No => "No",
        Undecided => "Undecided" | "Not decided yet",
    }
}

/// Contact metadata, carried through the engine untouched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub country_code: String,
    pub mobile: String,
    pub nationality: String,
}

/// Immutable input to one quotation computation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotationRequest {
    jurisdiction_type: JurisdictionType,
    emirate: Emirate,
    activities: Vec<ActivityCategory>,
    office_space: OfficeSpace,
    shareholders: u32,
    visas: u32,
    contact: ContactDetails,
}

impl QuotationRequest {
    pub fn builder() -> QuotationRequestBuilder {
        QuotationRequestBuilder::new()
    }

    pub fn jurisdiction_type(&self) -> JurisdictionType {
        self.jurisdiction_type
    }

    pub fn emirate(&self) -> Emirate {
        self.emirate
    }

    /// Activities in the order they were selected
    pub fn activities(&self) -> &[ActivityCategory] {
        &self.activities
    }

    pub fn office_space(&self) -> OfficeSpace {
        self.office_space
    }

    pub fn shareholders(&self) -> u32 {
        self.shareholders
    }

    pub fn visas(&self) -> u32 {
        self.visas
    }

    pub fn contact(&self) -> &ContactDetails {
        &self.contact
    }
}

/// Builder for quotation requests
///
/// Starts from the form's defaults: Freezone in Dubai, office space
/// undecided, one shareholder and no visas.
///
/// # Example
///
/// ```rust,ignore
/// let request = QuotationRequest::builder()
///     .activity(ActivityCategory::Trading)
///     .visas(2)
///     .contact(contact)
///     .build()?;
/// ```
#[derive(Debug, Clone)]
pub struct QuotationRequestBuilder {
    jurisdiction_type: JurisdictionType,
    emirate: Emirate,
    activities: Vec<ActivityCategory>,
    office_space: OfficeSpace,
    shareholders: u32,
    visas: u32,
    contact: Option<ContactDetails>,
}

impl QuotationRequestBuilder {
    pub fn new() -> Self {
        Self {
            jurisdiction_type: JurisdictionType::Freezone,
            emirate: Emirate::Dubai,
            activities: Vec::new(),
            office_space: OfficeSpace::Undecided,
            shareholders: 1,
            visas: 0,
            contact: None,
        }
    }

    pub fn jurisdiction_type(mut self, jurisdiction_type: JurisdictionType) -> Self {
        self.jurisdiction_type = jurisdiction_type;
        self
    }

    pub fn emirate(mut self, emirate: Emirate) -> Self {
        self.emirate = emirate;
        self
    }

    /// Appends one activity
    pub fn activity(mut self, activity: ActivityCategory) -> Self {
        self.activities.push(activity);
        self
    }

    /// Replaces the selected activities
    pub fn activities(mut self, activities: impl IntoIterator<Item = ActivityCategory>) -> Self {
        self.activities = activities.into_iter().collect();
        self
    }

    pub fn office_space(mut self, office_space: OfficeSpace) -> Self {
        self.office_space = office_space;
        self
    }

    pub fn shareholders(mut self, shareholders: u32) -> Self {
        self.shareholders = shareholders;
        self
    }

    pub fn visas(mut self, visas: u32) -> Self {
        self.visas = visas;
        self
    }

    pub fn contact(mut self, contact: ContactDetails) -> Self {
        self.contact = Some(contact);
        self
    }

    /// Builds the request.
    ///
    /// Only missing contact details are reported here. Activity cardinality
    /// and headcount ranges are checked by the resolver on every computation.
    pub fn build(self) -> Result<QuotationRequest, ValidationError> {
        let contact = self.contact.ok_or_else(|| {
            ValidationError::new(RequestField::Contact, "contact details are required")
        })?;

        Ok(QuotationRequest {
            jurisdiction_type: self.jurisdiction_type,
            emirate: self.emirate,
            activities: self.activities,
            office_space: self.office_space,
            shareholders: self.shareholders,
            visas: self.visas,
            contact,
        })
    }
}

impl Default for QuotationRequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
