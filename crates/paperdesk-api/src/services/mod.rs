pub mod email;
pub mod paypal;
