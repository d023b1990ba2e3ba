//! Shared message history with per-participant visibility.

use spy_core::{Message, MessageId, Participant};

/// All messages of the current game, in send order.
#[derive(Debug, Clone, Default)]
pub struct MessagePool {
    messages: Vec<Message>,
}

impl MessagePool {
    /// An empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sent message.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Every message, oldest first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// True when nothing was sent.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Messages `who` sent or received, oldest first.
    pub fn visible_to(&self, who: Participant) -> Vec<Message> {
        self.messages
            .iter()
            .filter(|m| m.is_visible_to(who))
            .cloned()
            .collect()
    }

    /// Ids of the messages visible to `who`.
    pub fn visible_ids(&self, who: Participant) -> Vec<MessageId> {
        self.messages
            .iter()
            .filter(|m| m.is_visible_to(who))
            .map(|m| m.id)
            .collect()
    }

    /// Drop all messages, before a new game.
    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spy_core::{MessageBody, Profile};

    #[test]
    fn players_only_see_their_messages() {
        let ann = Profile::new("Ann");
        let bo = Profile::new("Bo");
        let mut pool = MessagePool::new();
        pool.push(Message::from_moderator(
            vec![Participant::Player(ann.id), Participant::Player(bo.id)],
            "rules".into(),
            MessageBody::Rules,
        ));
        pool.push(Message::from_moderator(
            vec![Participant::Player(ann.id)],
            "Ann, your key is: <KEY>".into(),
            MessageBody::KeyAssignment { key: None },
        ));
        pool.push(Message::from_player(
            &bo,
            vec![Participant::Moderator],
            "hmm".into(),
            MessageBody::Description,
        ));

        assert_eq!(pool.visible_to(Participant::Player(ann.id)).len(), 2);
        assert_eq!(pool.visible_to(Participant::Player(bo.id)).len(), 2);
        assert_eq!(pool.visible_ids(Participant::Moderator).len(), 3);

        pool.clear();
        assert!(pool.is_empty());
    }
}
