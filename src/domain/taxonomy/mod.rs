//! Workspace taxonomy: categories, payment methods, and fuzzy label
//! resolution against a per-conversation snapshot.

mod entry;
mod resolver;

pub use entry::{Category, PaymentMethod, TaxonomySnapshot};
pub use resolver::{resolve_category, resolve_payment_method};

pub(crate) use resolver::variation_canonical;
