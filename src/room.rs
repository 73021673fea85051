use crate::message::outgoing::state_message::StateMessage;
use crate::message::outgoing::{OutgoingMessage, PauseBroadcast, PlayBroadcast, ResourceAvailableBroadcast, SeekBroadcast};
use crate::resource::ResourceId;
use crate::resource::store::ResourceStore;
use crate::room::client::Client;
use crate::room::client_id::ClientId;
use crate::room::clients::Clients;
use crate::room::playback_state::{PlaybackState, StateChange};
use chrono::Utc;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};

pub mod client;
pub mod client_id;
mod client_id_sequence;
mod clients;
pub mod playback_state;

/// The one shared room every viewer joins.
///
/// Playback state mutation and broadcast enqueueing happen under a single
/// lock, so facts reach every connection in the order they were applied and
/// a join-time snapshot always equals the replay of all facts applied so
/// far. The resource store's current pointer is only changed while that
/// lock is held, keeping resource swaps serialized with playback commands.
#[derive(Clone)]
pub struct Room {
	inner: Arc<Inner>,
}

struct Inner {
	state: Mutex<SynchronizedState>,
	resources: ResourceStore,
}

struct SynchronizedState {
	playback: PlaybackState,
	clients: Clients,
}

impl Room {
	pub fn new(resources: ResourceStore) -> Self {
		Self {
			inner: Arc::new(Inner {
				state: Mutex::new(SynchronizedState {
					playback: PlaybackState::at_rest(Utc::now()),
					clients: Clients::default(),
				}),
				resources,
			}),
		}
	}

	/// Add a new viewer. Its first queued message is a snapshot of the
	/// current playback state, taken under the same lock that serializes
	/// fact application, so no fact can be lost or reordered around it.
	pub fn join(&self) -> (Client, mpsc::UnboundedReceiver<OutgoingMessage>) {
		let (queue_sender, queue_receiver) = mpsc::unbounded_channel();

		let mut state = self.inner.state.lock();
		let client = state.clients.add(queue_sender);
		client.enqueue(StateMessage::from(&state.playback).into());
		drop(state);

		info!("Viewer {} joined.", client.id());
		(client, queue_receiver)
	}

	pub fn leave(&self, client_id: ClientId) {
		let remaining = self.inner.state.lock().clients.remove(client_id);
		info!("Viewer {client_id} left, {remaining} still connected.");
	}

	pub fn play(&self, sender: ClientId, position: f64) {
		let position = position.max(0.0);
		self.apply_and_relay(
			sender,
			StateChange::PlayedAt(position),
			PlayBroadcast { current_time: position }.into(),
		);
	}

	pub fn pause(&self, sender: ClientId, position: f64) {
		let position = position.max(0.0);
		self.apply_and_relay(
			sender,
			StateChange::PausedAt(position),
			PauseBroadcast { current_time: position }.into(),
		);
	}

	pub fn seek(&self, sender: ClientId, position: f64) {
		let position = position.max(0.0);
		self.apply_and_relay(
			sender,
			StateChange::SeekedTo(position),
			SeekBroadcast { current_time: position }.into(),
		);
	}

	/// Apply a playback fact and relay it to everyone but the sender.
	/// Commands without an active resource are dropped; they must neither
	/// mutate state nor broadcast.
	fn apply_and_relay(&self, sender: ClientId, change: StateChange, message: OutgoingMessage) {
		let mut state = self.inner.state.lock();
		if state.playback.resource.is_none() {
			debug!("Dropping {change:?} from {sender}, no resource is active.");
			return;
		}
		state.playback.apply(change, Utc::now());
		state.clients.broadcast_excluding(sender, &message);
	}

	/// Swap in a freshly stored resource. The previous file's deletion is
	/// scheduled by the resource store; the confirmation is broadcast to
	/// every viewer, including the uploader, only after both mutations are
	/// complete.
	pub fn replace_resource(&self, resource: ResourceId) {
		let mut state = self.inner.state.lock();
		self.inner.resources.replace(resource.clone());
		state.playback.apply(StateChange::ResourceReplaced(resource.clone()), Utc::now());
		state
			.clients
			.broadcast(&ResourceAvailableBroadcast { resource }.into());
	}

	/// Remove the current resource. Idempotent: the removal fact is
	/// broadcast to everyone even when no resource was active.
	pub fn remove_resource(&self) {
		let mut state = self.inner.state.lock();
		self.inner.resources.remove();
		state.playback.apply(StateChange::ResourceRemoved, Utc::now());
		state.clients.broadcast(&OutgoingMessage::ResourceRemoved);
	}

	pub fn resources(&self) -> &ResourceStore {
		&self.inner.resources
	}

	pub fn snapshot(&self) -> PlaybackState {
		self.inner.state.lock().playback.clone()
	}
}
