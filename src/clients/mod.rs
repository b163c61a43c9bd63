pub mod account;
pub mod helpline;
pub mod notify;
