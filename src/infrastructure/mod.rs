pub mod demo_auth;
