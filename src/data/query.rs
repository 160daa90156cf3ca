// ---------------------------------------------------------------------------
// Form input → SoQL query
// ---------------------------------------------------------------------------

/// Radio label meaning "no class filter".
pub const ALL_CLASSES: &str = "All";

/// Class filters offered in the search form. Matching is by substring, so
/// `L` also matches `LL6` and `L5`.
pub const CLASS_CHOICES: &[&str] = &[
    ALL_CLASSES,
    "H",
    "L",
    "LL",
    "CM",
    "CV",
    "Iron",
    "Eucrite",
    "Pallasite",
    "Mesosiderite",
];

/// Heading shown while the default (unfiltered) listing is on screen.
pub const DEFAULT_DESCRIPTION: &str = "The Top 10 Densest Known Meteorites";

const MASS_PRESENT: &str = "mass IS NOT NULL";
const ORDER_BY_MASS_DESC: &str = "mass DESC";

/// Current search input: name substring plus the selected class radio.
/// `class_choice` is `None` when no radio is selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub name_pattern: String,
    pub class_choice: Option<String>,
}

impl FilterState {
    pub fn new(name_pattern: impl Into<String>, class_choice: Option<&str>) -> Self {
        Self {
            name_pattern: name_pattern.into(),
            class_choice: class_choice.map(str::to_string),
        }
    }

    /// The class to filter on, if a specific (non-"All") one is selected.
    pub fn class_filter(&self) -> Option<&str> {
        self.class_choice
            .as_deref()
            .filter(|c| !c.is_empty() && *c != ALL_CLASSES)
    }

    /// SoQL `$where` expression for this input.
    pub fn filter_expression(&self) -> String {
        let mut expr = format!("name LIKE '%{}%' AND {MASS_PRESENT}", self.name_pattern);
        if let Some(class) = self.class_filter() {
            expr.push_str(&format!(" AND recclass LIKE '%{class}%'"));
        }
        expr
    }

    /// Heading describing what the search returned.
    pub fn description(&self) -> String {
        match self.class_filter() {
            Some(class) => format!(
                "Known {class} Meteorites with Names Like '{}'",
                self.name_pattern
            ),
            None => format!("Known Meteorites with Names Like '{}'", self.name_pattern),
        }
    }

    /// Heading shown when the search matched nothing.
    pub fn no_records_message(&self) -> String {
        match self.class_filter() {
            Some(class) if !self.name_pattern.is_empty() => format!(
                "No recorded {class} meteorite landings with names like '{}'",
                self.name_pattern
            ),
            _ => "No recorded meteorite landings".to_string(),
        }
    }

    /// Clear the name field and deselect every class radio.
    pub fn reset(&mut self) {
        self.name_pattern.clear();
        self.class_choice = None;
    }
}

// ---------------------------------------------------------------------------
// SoqlQuery – the parameters of one request
// ---------------------------------------------------------------------------

/// One request against the dataset, rendered as Socrata query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoqlQuery {
    pub filter: String,
    pub order: String,
    pub limit: u32,
}

impl SoqlQuery {
    /// The heaviest `limit` meteorites with a recorded mass.
    pub fn top_by_mass(limit: u32) -> Self {
        Self {
            filter: MASS_PRESENT.to_string(),
            order: ORDER_BY_MASS_DESC.to_string(),
            limit,
        }
    }

    /// Up to `limit` meteorites matching `filter`, heaviest first.
    pub fn search(filter: &FilterState, limit: u32) -> Self {
        Self {
            filter: filter.filter_expression(),
            order: ORDER_BY_MASS_DESC.to_string(),
            limit,
        }
    }

    /// `$where` / `$order` / `$limit` pairs, unencoded.
    pub fn params(&self) -> [(&'static str, String); 3] {
        [
            ("$where", self.filter.clone()),
            ("$order", self.order.clone()),
            ("$limit", self.limit.to_string()),
        ]
    }
}
