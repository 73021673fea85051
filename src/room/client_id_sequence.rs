use crate::room::client_id::ClientId;

#[derive(Default)]
pub struct ClientIdSequence {
	next_id: u64,
}

impl ClientIdSequence {
	pub fn next(&mut self) -> ClientId {
		let id = self.next_id;
		self.next_id += 1;
		ClientId::from(id)
	}
}
