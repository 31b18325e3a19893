use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

/// The three panels the journal page toggles between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Panel {
    Create,
    Edit,
    Detail,
}

impl Panel {
    pub fn selector(self) -> &'static str {
        match self {
            Panel::Create => ".createForm",
            Panel::Edit => ".editForm",
            Panel::Detail => ".detailForm",
        }
    }
}

/// Clickable controls wired by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    /// Submits the create form.
    Add,
    /// Submits the edit form.
    Submit,
    Edit,
    Cancel,
    /// Opens the create form.
    Create,
}

impl Control {
    pub fn selector(self) -> &'static str {
        match self {
            Control::Add => "#addBtn",
            Control::Submit => "#submitBtn",
            Control::Edit => "#editBtn",
            Control::Cancel => "#cancelBtn",
            Control::Create => "#createBtn",
        }
    }

    /// Whether the click would otherwise submit a form.
    pub fn suppresses_default(self) -> bool {
        matches!(self, Control::Add | Control::Submit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Text,
}

impl Field {
    pub fn selector(self) -> &'static str {
        match self {
            Field::Title => "#title",
            Field::Text => "#text",
        }
    }
}

/// The document surface the controller reads from and mutates.
///
/// `hide` and `show` resolve when their transition has finished.
#[async_trait]
pub trait Page: Send {
    fn value(&self, field: Field) -> String;

    fn reset(&mut self, control: Control);

    /// Stops the browser's own handling of a click on `control`, which for the
    /// submit buttons would post the form and reload the page.
    fn prevent_default(&mut self, control: Control);

    /// Inserts `html` as the next sibling of `panel`.
    fn insert_after(&mut self, panel: Panel, html: &str);

    async fn hide(&mut self, panel: Panel);

    async fn show(&mut self, panel: Panel);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Panel(Panel),
    Fragment(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEvent {
    HideStarted(Panel),
    HideFinished(Panel),
    ShowStarted(Panel),
    ShowFinished(Panel),
    Reset(Control),
    DefaultPrevented(Control),
    Inserted(Panel),
}

/// Headless page: a flat document, panel visibility and a log of every
/// mutation in the order it happened.
#[derive(Debug, Clone)]
pub struct MemoryPage {
    fields: HashMap<Field, String>,
    visible: HashMap<Panel, bool>,
    document: Vec<Node>,
    events: Vec<PageEvent>,
    transition: Duration,
}

impl MemoryPage {
    /// Home page layout: a hidden create form above the entry list.
    pub fn home() -> Self {
        Self::with_layout(&[(Panel::Create, false)])
    }

    /// Detail page layout: the entry is visible, its edit form hidden.
    pub fn detail() -> Self {
        Self::with_layout(&[(Panel::Detail, true), (Panel::Edit, false)])
    }

    pub fn with_layout(panels: &[(Panel, bool)]) -> Self {
        Self {
            fields: HashMap::new(),
            visible: panels.iter().copied().collect(),
            document: panels.iter().map(|(panel, _)| Node::Panel(*panel)).collect(),
            events: Vec::new(),
            transition: Duration::ZERO,
        }
    }

    /// Makes every hide/show take `transition` to complete.
    pub fn with_transition(mut self, transition: Duration) -> Self {
        self.transition = transition;
        self
    }

    pub fn set_value(&mut self, field: Field, value: impl Into<String>) {
        self.fields.insert(field, value.into());
    }

    pub fn is_visible(&self, panel: Panel) -> bool {
        self.visible.get(&panel).copied().unwrap_or(false)
    }

    pub fn visible_panels(&self) -> Vec<Panel> {
        self.document
            .iter()
            .filter_map(|node| match node {
                Node::Panel(panel) if self.is_visible(*panel) => Some(*panel),
                _ => None,
            })
            .collect()
    }

    pub fn document(&self) -> &[Node] {
        &self.document
    }

    /// The node directly following `panel` in document order.
    pub fn next_sibling(&self, panel: Panel) -> Option<&Node> {
        let index = self.position(panel)?;
        self.document.get(index + 1)
    }

    pub fn events(&self) -> &[PageEvent] {
        &self.events
    }

    fn position(&self, panel: Panel) -> Option<usize> {
        self.document
            .iter()
            .position(|node| *node == Node::Panel(panel))
    }

    async fn transition(&self) {
        if self.transition.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(self.transition).await;
        }
    }
}

#[async_trait]
impl Page for MemoryPage {
    fn value(&self, field: Field) -> String {
        self.fields.get(&field).cloned().unwrap_or_default()
    }

    fn reset(&mut self, control: Control) {
        self.events.push(PageEvent::Reset(control));
    }

    fn prevent_default(&mut self, control: Control) {
        self.events.push(PageEvent::DefaultPrevented(control));
    }

    fn insert_after(&mut self, panel: Panel, html: &str) {
        // Missing anchors match nothing, like an empty selection.
        if let Some(index) = self.position(panel) {
            self.document
                .insert(index + 1, Node::Fragment(html.to_string()));
            self.events.push(PageEvent::Inserted(panel));
        }
    }

    async fn hide(&mut self, panel: Panel) {
        self.events.push(PageEvent::HideStarted(panel));
        self.transition().await;
        self.visible.insert(panel, false);
        self.events.push(PageEvent::HideFinished(panel));
    }

    async fn show(&mut self, panel: Panel) {
        self.events.push(PageEvent::ShowStarted(panel));
        self.transition().await;
        self.visible.insert(panel, true);
        self.events.push(PageEvent::ShowFinished(panel));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn insert_after_places_newest_first() {
        let mut page = MemoryPage::home();
        page.insert_after(Panel::Create, "<p>old</p>");
        page.insert_after(Panel::Create, "<p>new</p>");
        assert_eq!(
            page.document(),
            &[
                Node::Panel(Panel::Create),
                Node::Fragment("<p>new</p>".to_string()),
                Node::Fragment("<p>old</p>".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn insert_after_missing_panel_is_a_no_op() {
        let mut page = MemoryPage::home();
        page.insert_after(Panel::Edit, "<p>x</p>");
        assert_eq!(page.document().len(), 1);
        assert!(page.events().is_empty());
    }

    #[tokio::test]
    async fn hide_and_show_toggle_visibility() {
        let mut page = MemoryPage::detail();
        assert_eq!(page.visible_panels(), vec![Panel::Detail]);
        page.hide(Panel::Detail).await;
        page.show(Panel::Edit).await;
        assert_eq!(page.visible_panels(), vec![Panel::Edit]);
    }

    #[test]
    fn only_submit_controls_suppress_default() {
        assert!(Control::Add.suppresses_default());
        assert!(Control::Submit.suppresses_default());
        assert!(!Control::Edit.suppresses_default());
        assert!(!Control::Cancel.suppresses_default());
        assert!(!Control::Create.suppresses_default());
    }
}
