use crate::message::outgoing::OutgoingMessage;
use crate::room::client::Client;
use crate::room::client_id::ClientId;
use crate::room::client_id_sequence::ClientIdSequence;
use std::collections::BTreeMap;
use tokio::sync::mpsc;

/// The set of currently connected viewers. Unbounded; a session holds
/// nothing but its outbound queue.
#[derive(Default)]
pub struct Clients {
	client_id_sequence: ClientIdSequence,
	clients_by_id: BTreeMap<ClientId, Client>,
}

impl Clients {
	/// Add a new client, passing in the sending end of its outbound queue.
	pub fn add(&mut self, queue: mpsc::UnboundedSender<OutgoingMessage>) -> Client {
		let client_id = self.client_id_sequence.next();
		let client = Client::new(client_id, queue);

		if self.clients_by_id.insert(client_id, client.clone()).is_some() {
			unreachable!("There must never be two clients with the same id!");
		}

		client
	}

	/// Remove a client, returning how many are left.
	pub fn remove(&mut self, client_id: ClientId) -> usize {
		self.clients_by_id.remove(&client_id);
		self.clients_by_id.len()
	}

	pub fn broadcast(&self, message: &OutgoingMessage) {
		for client in self.clients_by_id.values() {
			client.enqueue(message.clone());
		}
	}

	pub fn broadcast_excluding(&self, sender: ClientId, message: &OutgoingMessage) {
		for client in self.clients_by_id.values().filter(|client| client.id() != sender) {
			client.enqueue(message.clone());
		}
	}
}
