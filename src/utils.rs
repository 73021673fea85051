pub mod infallible_stream;

#[cfg(test)]
pub mod fake_message_sender;
#[cfg(test)]
pub mod test_client;
