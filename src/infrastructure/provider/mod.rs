pub mod token_client;
