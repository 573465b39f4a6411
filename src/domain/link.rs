use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Per-link cap enforced at validation time.
pub const MAX_PER_LINK: Decimal = dec!(250);

/// Selectable country labels for the entry form. Closed list, display-only;
/// no business logic attached.
pub const COUNTRIES: [&str; 10] = [
    "United States",
    "United Kingdom",
    "Canada",
    "Germany",
    "France",
    "Australia",
    "Japan",
    "Brazil",
    "India",
    "Other",
];

pub const DEFAULT_COUNTRY: &str = "United States";

/// One row of the entry form.
///
/// The amount stays the raw user string; parsing happens at total and
/// validation time, with anything unparsable counting as zero. The id only
/// identifies the row for edits and removal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkEntry {
    pub id: Uuid,
    pub url: String,
    pub amount: String,
    pub country: String,
}

impl LinkEntry {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            url: String::new(),
            amount: String::new(),
            country: DEFAULT_COUNTRY.to_string(),
        }
    }

    pub fn parsed_amount(&self) -> Decimal {
        self.amount.trim().parse().unwrap_or(Decimal::ZERO)
    }
}

impl Default for LinkEntry {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkField {
    Country,
    Url,
    Amount,
}

/// What the entry form hands to the rest of the flow: the committed links
/// and their total. Passed by value from screen to screen, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub links: Vec<LinkEntry>,
    pub total: Decimal,
}

/// The editable link list backing the entry screen.
///
/// Always holds at least one entry; removing the last one is a no-op.
#[derive(Debug)]
pub struct LinkForm {
    links: Vec<LinkEntry>,
    errors: HashMap<Uuid, String>,
}

impl LinkForm {
    pub fn new() -> Self {
        Self {
            links: vec![LinkEntry::new()],
            errors: HashMap::new(),
        }
    }

    pub fn links(&self) -> &[LinkEntry] {
        &self.links
    }

    pub fn error(&self, id: Uuid) -> Option<&str> {
        self.errors.get(&id).map(String::as_str)
    }

    /// Appends an empty entry with the default country and returns its id.
    pub fn add_link(&mut self) -> Uuid {
        let entry = LinkEntry::new();
        let id = entry.id;
        self.links.push(entry);
        id
    }

    /// Removes an entry, unless it is the last remaining one.
    pub fn remove_link(&mut self, id: Uuid) {
        if self.links.len() > 1 {
            self.links.retain(|l| l.id != id);
        }
    }

    /// Replaces one field of one entry and clears that entry's error.
    pub fn update_link(&mut self, id: Uuid, field: LinkField, value: &str) {
        if let Some(link) = self.links.iter_mut().find(|l| l.id == id) {
            match field {
                LinkField::Country => link.country = value.to_string(),
                LinkField::Url => link.url = value.to_string(),
                LinkField::Amount => link.amount = value.to_string(),
            }
            self.errors.remove(&id);
        }
    }

    /// Sum of parsed amounts, unparsable/empty entries counting as zero.
    pub fn total(&self) -> Decimal {
        self.links.iter().map(LinkEntry::parsed_amount).sum()
    }

    /// Recomputes per-entry errors and reports whether the form is clean.
    ///
    /// The checks run in a fixed order per entry: missing URL, then amount
    /// over the cap, then missing/non-positive amount. The over-cap check
    /// deliberately comes before the missing-amount one, so an entry that
    /// fails both reports "Max $250 per link".
    pub fn validate(&mut self) -> bool {
        self.errors.clear();
        for link in &self.links {
            let amount = link.parsed_amount();
            let error = if link.url.trim().is_empty() {
                Some("Link is required")
            } else if amount > MAX_PER_LINK {
                Some("Max $250 per link")
            } else if amount <= Decimal::ZERO {
                Some("Valid amount required")
            } else {
                None
            };
            if let Some(error) = error {
                self.errors.insert(link.id, error.to_string());
            }
        }
        self.errors.is_empty()
    }

    /// Commits the form as an [`Order`].
    ///
    /// Refused while the total is exactly zero (the UI disables the button,
    /// no errors are surfaced) and while any entry fails validation.
    pub fn submit(&mut self) -> Option<Order> {
        if self.total() == Decimal::ZERO {
            return None;
        }
        if !self.validate() {
            return None;
        }
        Some(Order {
            links: self.links.clone(),
            total: self.total(),
        })
    }
}

impl Default for LinkForm {
    fn default() -> Self {
        Self::new()
    }
}
