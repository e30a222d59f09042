//! Editor session state
//!
//! One session owns the working copy of a template, the selection, the
//! drag flag, the decoded image table and the viewport. Every mutation
//! goes through a session method; the host UI only forwards events.

use crate::images::ImageStore;
use template::scale::FitMode;
use template::{AssetSource, Element, ElementPatch, Template};

/// Current interaction state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    Idle,
    Selected,
    Dragging,
}

/// Viewport: container size plus the derived display scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub container_width: f64,
    pub container_height: f64,
    pub scale: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            container_width: 0.0,
            container_height: 0.0,
            scale: 1.0,
        }
    }
}

/// A pending inline text edit, seeded with the current text.
///
/// The host shows its edit UI, mutates `text`, and passes the request
/// back through [`EditorSession::commit_text_edit`]. Dropping it
/// without committing cancels the edit.
#[derive(Debug, Clone)]
pub struct TextEditRequest {
    pub element_id: String,
    pub text: String,
}

/// Editing session for one template
pub struct EditorSession {
    template: Template,
    selected: Option<String>,
    dragging: bool,
    viewport: Viewport,
    images: ImageStore,
    background_fit: FitMode,
}

impl EditorSession {
    /// Open a template for editing, decoding its images up front
    pub fn open(template: Template, assets: &dyn AssetSource) -> Self {
        let images = ImageStore::load(&template, assets);
        Self {
            template,
            selected: None,
            dragging: false,
            viewport: Viewport::default(),
            images,
            background_fit: FitMode::default(),
        }
    }

    pub fn background_fit(&self) -> FitMode {
        self.background_fit
    }

    pub fn set_background_fit(&mut self, fit: FitMode) {
        self.background_fit = fit;
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    /// Take the template back out (for saving)
    pub fn into_template(self) -> Template {
        self.template
    }

    pub fn images(&self) -> &ImageStore {
        &self.images
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn interaction(&self) -> Interaction {
        match (&self.selected, self.dragging) {
            (Some(_), true) => Interaction::Dragging,
            (Some(_), false) => Interaction::Selected,
            (None, _) => Interaction::Idle,
        }
    }

    /// Pointer down on empty canvas clears the selection
    pub fn pointer_down_on_canvas(&mut self) {
        self.selected = None;
        self.dragging = false;
    }

    /// Click on an element selects it. Unknown IDs clear the selection.
    pub fn select(&mut self, id: &str) {
        self.dragging = false;
        self.selected = self
            .template
            .element(id)
            .map(|e| e.id().to_string());
    }

    /// Start dragging the selected element. No-op without a selection.
    pub fn begin_drag(&mut self) {
        if self.selected.is_some() {
            self.dragging = true;
        }
    }

    /// Finish a drag, committing the new position in canvas pixels
    pub fn end_drag(&mut self, x: f64, y: f64) {
        if !self.dragging {
            return;
        }
        self.dragging = false;
        if let Some(id) = self.selected.clone() {
            self.template.update_element(
                &id,
                &ElementPatch {
                    x: Some(x),
                    y: Some(y),
                    ..Default::default()
                },
            );
        }
    }

    /// Add a text element with the defaults and select it
    pub fn add_text(&mut self) -> String {
        let id = self.template.add_text();
        self.selected = Some(id.clone());
        self.dragging = false;
        id
    }

    /// Add an image element, decode it, and select it
    pub fn add_image(
        &mut self,
        url: &str,
        natural_width: f64,
        natural_height: f64,
        assets: &dyn AssetSource,
    ) -> String {
        let id = self.template.add_image(url, natural_width, natural_height);
        self.images.load_element(&id, url, assets);
        self.selected = Some(id.clone());
        self.dragging = false;
        id
    }

    /// Apply a toolbar patch to the selected element
    pub fn update_selected(&mut self, patch: &ElementPatch) {
        if let Some(id) = self.selected.clone() {
            self.template.update_element(&id, patch);
        }
    }

    /// Delete an element. Clears the selection only when it was the
    /// deleted element.
    pub fn delete_element(&mut self, id: &str) {
        if self.template.delete_element(id) {
            self.images.remove(id);
            if self.selected.as_deref() == Some(id) {
                self.selected = None;
                self.dragging = false;
            }
        }
    }

    /// Begin an inline text edit on a text element
    pub fn request_text_edit(&mut self, id: &str) -> Option<TextEditRequest> {
        match self.template.element(id) {
            Some(Element::Text(e)) => Some(TextEditRequest {
                element_id: e.id.clone(),
                text: e.text.clone(),
            }),
            _ => None,
        }
    }

    /// Commit an inline text edit. Empty text is a valid commit.
    pub fn commit_text_edit(&mut self, edit: TextEditRequest) {
        self.template.update_element(
            &edit.element_id,
            &ElementPatch {
                text: Some(edit.text),
                ..Default::default()
            },
        );
    }

    /// Recompute the display scale for a new container size
    pub fn set_container_size(&mut self, width: f64, height: f64) {
        self.viewport = Viewport {
            container_width: width,
            container_height: height,
            scale: template::scale::display_scale(self.template.canvas, width, height),
        };
    }

    /// Display scale as a whole percentage, for the zoom indicator
    pub fn scale_percent(&self) -> u32 {
        (self.viewport.scale * 100.0).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use template::MemoryAssets;

    fn session() -> EditorSession {
        EditorSession::open(Template::new("t"), &MemoryAssets::new())
    }

    #[test]
    fn test_starts_idle() {
        let session = session();
        assert_eq!(session.interaction(), Interaction::Idle);
        assert_eq!(session.selected_id(), None);
    }

    #[test]
    fn test_select_and_clear() {
        let mut session = session();
        let id = session.add_text();
        assert_eq!(session.interaction(), Interaction::Selected);

        session.pointer_down_on_canvas();
        assert_eq!(session.interaction(), Interaction::Idle);

        session.select(&id);
        assert_eq!(session.selected_id(), Some(id.as_str()));
    }

    #[test]
    fn test_select_unknown_id_clears() {
        let mut session = session();
        session.add_text();
        session.select("nope");
        assert_eq!(session.interaction(), Interaction::Idle);
    }

    #[test]
    fn test_drag_commits_position() {
        let mut session = session();
        let id = session.add_text();

        session.begin_drag();
        assert_eq!(session.interaction(), Interaction::Dragging);

        session.end_drag(410.0, 230.0);
        assert_eq!(session.interaction(), Interaction::Selected);

        let element = session.template().element(&id).unwrap();
        assert_eq!(element.position(), (410.0, 230.0));
    }

    #[test]
    fn test_end_drag_without_begin_is_noop() {
        let mut session = session();
        let id = session.add_text();
        session.end_drag(5.0, 5.0);
        assert_eq!(session.template().element(&id).unwrap().position(), (100.0, 100.0));
    }

    #[test]
    fn test_delete_selected_clears_selection() {
        let mut session = session();
        let id = session.add_text();
        session.delete_element(&id);
        assert_eq!(session.interaction(), Interaction::Idle);
        assert!(session.template().fields.is_empty());
    }

    #[test]
    fn test_delete_other_keeps_selection() {
        let mut session = session();
        let first = session.add_text();
        let second = session.add_text();
        session.select(&first);

        session.delete_element(&second);
        assert_eq!(session.selected_id(), Some(first.as_str()));
    }

    #[test]
    fn test_text_edit_commit() {
        let mut session = session();
        let id = session.add_text();

        let mut edit = session.request_text_edit(&id).unwrap();
        assert_eq!(edit.text, "Nuevo Texto");

        edit.text = String::new();
        session.commit_text_edit(edit);

        let Element::Text(e) = session.template().element(&id).unwrap() else {
            panic!("Expected text element");
        };
        assert_eq!(e.text, "");
    }

    #[test]
    fn test_text_edit_cancel_leaves_text() {
        let mut session = session();
        let id = session.add_text();

        let edit = session.request_text_edit(&id).unwrap();
        drop(edit);

        let Element::Text(e) = session.template().element(&id).unwrap() else {
            panic!("Expected text element");
        };
        assert_eq!(e.text, "Nuevo Texto");
    }

    #[test]
    fn test_text_edit_rejected_for_images() {
        let mut session = session();
        let id = session.add_image("a.png", 10.0, 10.0, &MemoryAssets::new());
        assert!(session.request_text_edit(&id).is_none());
    }

    #[test]
    fn test_container_resize_updates_scale() {
        let mut session = session();
        session.set_container_size(800.0, 600.0);
        assert_eq!(session.viewport().scale, 0.5);
        assert_eq!(session.scale_percent(), 50);

        session.set_container_size(3200.0, 3000.0);
        assert_eq!(session.viewport().scale, 1.0);
        assert_eq!(session.scale_percent(), 100);
    }
}
