pub mod token_state;
