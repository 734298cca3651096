//! Contract messages and the polymorphic families they embed.

pub mod action;
pub mod auth;
pub mod catalog;
pub mod payment_method_definition;
pub mod receipt;
pub mod session;
pub mod tax;
pub mod user;
pub mod user_payment_method;
pub mod vault;

pub use action::{Action, ValueMap};
pub use payment_method_definition::PaymentMethodDefinition;
pub use user_payment_method::UserPaymentMethod;
