//! Timeline - append-only ordered log of messages
//!
//! Insertion order is display order. There is no removal or reset API.

use serde::Serialize;

use super::content::Message;

#[derive(Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Timeline {
    messages: Vec<Message>,
}

impl Timeline {
    /// Create an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a timeline seeded with the synthetic welcome message.
    pub fn seeded(welcome: impl Into<String>) -> Self {
        let mut timeline = Self::new();
        timeline.append(Message::bot(welcome));
        timeline
    }

    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Sender;

    #[test]
    fn test_seeded_timeline_has_one_bot_message() {
        let timeline = Timeline::seeded("welcome");
        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline.messages()[0].sender(), Sender::Bot);
        assert_eq!(timeline.messages()[0].text(), "welcome");
    }

    #[test]
    fn test_append_preserves_insertion_order() {
        let mut timeline = Timeline::new();
        assert!(timeline.is_empty());

        timeline.append(Message::user("first"));
        timeline.append(Message::bot("second"));
        timeline.append(Message::user("third"));

        let texts: Vec<&str> = timeline.iter().map(Message::text).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
        assert_eq!(timeline.last().map(Message::text), Some("third"));
    }
}
