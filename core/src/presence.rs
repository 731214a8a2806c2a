pub const PRESENCE_TITLE: &str = "Users Playing:";

/// Names of everyone connected to a session, in the order the server sent
/// them. Replaced wholesale on every update.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Presence(Vec<String>);

impl Presence {
    pub fn new(names: Vec<String>) -> Self {
        Self(names)
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }
}

pub fn render_presence(presence: Option<&Presence>) -> Vec<String> {
    presence.map(|presence| presence.names().to_vec()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_keep_server_order_and_duplicates() {
        let presence = Presence::new(vec!["bob".into(), "ann".into(), "bob".into()]);
        assert_eq!(render_presence(Some(&presence)), vec!["bob", "ann", "bob"]);
    }

    #[test]
    fn absent_or_empty_renders_nothing() {
        assert!(render_presence(None).is_empty());
        assert!(render_presence(Some(&Presence::default())).is_empty());
    }
}
