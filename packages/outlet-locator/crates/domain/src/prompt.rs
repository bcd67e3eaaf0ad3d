//! Text assembly for the chat provider and the embedding index.
//!
//! The layout of these strings is observable behaviour: field order and the
//! `" - "` separator shape what the model sees, so tests pin them exactly.

use crate::entities::outlet::{Outlet, OutletSummary};

pub const ASSISTANT_ROLE: &str = "You are a helpful assistant for McDonald's outlet search.";

pub const LIST_STYLE_RULE: &str =
    "Do not use numbered lists. Instead, list items separated by commas for readability.";

pub const FIELD_SEPARATOR: &str = " - ";

/// One `name - address` line per retrieved outlet, in the order given.
pub fn semantic_context(hits: &[OutletSummary]) -> String {
    hits.iter()
        .map(|o| format!("{}{}{}", o.name, FIELD_SEPARATOR, o.address))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One `name - address - categories` line per outlet, in repository order.
pub fn full_context(outlets: &[Outlet]) -> String {
    outlets
        .iter()
        .map(|o| {
            format!(
                "{name}{sep}{address}{sep}{categories}",
                name = o.name,
                address = o.address,
                categories = o.categories.join(", "),
                sep = FIELD_SEPARATOR,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn semantic_system_prompt(query: &str, context: &str) -> String {
    format!(
        "{ASSISTANT_ROLE}\n\n\
         User Query: {query}\n\n\
         Matching Outlets:\n{context}\n\n\
         Answer the user clearly and concisely based only on the outlets above. {LIST_STYLE_RULE}"
    )
}

pub fn full_context_system_prompt(context: &str) -> String {
    format!(
        "{ASSISTANT_ROLE}\n\n\
         All Outlets:\n{context}\n\n\
         Use the above outlets data to answer user questions clearly and concisely, \
         based only on the outlets above. {LIST_STYLE_RULE}"
    )
}

/// Descriptive text embedded for an outlet at indexing time.
pub fn canonical_text(outlet: &Outlet) -> String {
    format!(
        "Name: {}. Address: {}. Latitude: {}. Longitude: {}. Categories: {}.",
        outlet.name,
        outlet.address,
        outlet.location.latitude(),
        outlet.location.longitude(),
        outlet.categories.join(", "),
    )
}
