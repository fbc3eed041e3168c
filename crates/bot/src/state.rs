use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};
use teloxide::types::ChatId;

/// Per-chat conversation step. Absence from the holder means the chat is in
/// the idle state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum State {
    /// A payment screenshot was received; the next text message is the
    /// full name from the receipt.
    AwaitingName,
}

#[derive(Default, Clone)]
pub struct StateHolder {
    map: Arc<Mutex<HashMap<ChatId, State>>>,
}

impl StateHolder {
    pub fn get_state(&self, chat_id: ChatId) -> Option<State> {
        let map = self.map.lock().unwrap();
        map.get(&chat_id).cloned()
    }

    pub fn set_state(&self, chat_id: ChatId, state: State) {
        let mut map = self.map.lock().unwrap();
        map.insert(chat_id, state);
    }

    pub fn remove_state(&self, chat_id: ChatId) {
        let mut map = self.map.lock().unwrap();
        map.remove(&chat_id);
    }
}
