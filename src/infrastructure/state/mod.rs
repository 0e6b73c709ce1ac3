pub mod request_state;
