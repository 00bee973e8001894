//! The fixed Lithuanian message set and order summary formatting.
//!
//! Every user-visible string lives here so the conversation logic stays
//! free of literals.

use crate::state_machine::Order;

/// Prompt shown when the conversation starts.
pub const CITY_PROMPT: &str = "🏡 Pasirink savo miestą:";

/// City choices offered on the reply keyboard.
pub const CITY_OPTIONS: &[&str] = &["🏙️ Vilnius", "🏙️ Kaunas", "🏙️ Klaipėda"];

/// Prompt shown after a city has been chosen.
pub const PRODUCT_PROMPT: &str = "🛍️ Pasirink produktą:";

/// Prompt shown after a product has been matched.
pub const QUANTITY_PROMPT: &str = "🔢 Pasirink kiekį:";

/// Reply when the product text matches nothing in the catalog.
pub const UNKNOWN_PRODUCT: &str = "❌ Nežinomas produktas. Bandyk iš naujo.";

/// Reply when the product step receives an empty choice.
pub const MISSING_PRODUCT: &str = "❌ Negautas produkto pasirinkimas. Bandyk iš naujo.";

/// Acknowledgement for /cancel.
pub const CANCELLED: &str = "❌ Užsakymas atšauktas.";

/// Static payment address presented in the order summary.
pub const PAYMENT_ADDRESS: &str = "bc1qexampleaddress...";

/// Render the final order summary. The body is Markdown: the payment
/// address is a code span so it can be copied with one tap.
pub fn order_summary(order: &Order) -> String {
    format!(
        "🛒 Užsakymo suvestinė:\n\
         📍 Miestas: {city}\n\
         📦 Produktas: {product}\n\
         🔢 Kiekis: {quantity}\n\n\
         💸 Prašome atlikti mokėjimą į šį kripto adresą:\n\n\
         `{address}`",
        city = order.city,
        product = order.product,
        quantity = order.quantity,
        address = PAYMENT_ADDRESS,
    )
}
