//! Interaction controller: pointer/keyboard input → scene commands.
//!
//! Exactly one gesture is active at a time. Drag and resize capture their
//! start state on pointer-down and compute every move from that snapshot,
//! so coalesced or dropped `pointermove` samples never make an item drift.
//! The controller never touches the store directly; every change goes
//! through [`Controller::dispatch`].
//!
//! | Gesture  | Starts on                         | Ends on                      |
//! |----------|-----------------------------------|------------------------------|
//! | Drag     | pointer-down on an item body      | pointer-up                   |
//! | Resize   | pointer-down on a selected handle | pointer-up (anywhere)        |
//! | TextEdit | double-click on text / add text   | blur, Escape, other gesture  |

use crate::commands::{CommandOutcome, SceneCommand};
use crate::input::{InputEvent, Modifiers};
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use mb_core::config::BoardConfig;
use mb_core::error::{SceneError, SceneResult};
use mb_core::id::ItemId;
use mb_core::model::*;
use mb_core::store::{SceneStore, TextCommit};
use mb_core::typography::{TypographySet, standard_presets};
use mb_render::background::BackgroundStyle;
use mb_render::hit::{Hit, HitPart, hit_test, local_delta};
use mb_render::view::{CanvasTheme, ViewState, VisualTree, render_scene};

/// The active pointer/text gesture.
#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    Idle,
    Drag {
        id: ItemId,
        start_pointer: Point,
        start_position: Point,
    },
    Resize {
        id: ItemId,
        handle: ResizeHandle,
        start_size: Size,
        start_pointer: Point,
    },
    TextEdit {
        id: ItemId,
        draft: String,
    },
}

pub struct Controller {
    store: SceneStore,
    gesture: Gesture,
    zoom: f32,
    /// Typography for new text blocks (the ambient font preference).
    text_style: TextStyle,
    background: BackgroundStyle,
    theme: CanvasTheme,
    /// Presets picked from board images.
    typography: TypographySet,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(BoardConfig::default())
    }
}

impl Controller {
    pub fn new(config: BoardConfig) -> Self {
        let text_style = config.text_defaults.clone();
        Self {
            store: SceneStore::new(config),
            gesture: Gesture::Idle,
            zoom: 1.0,
            text_style,
            background: BackgroundStyle::default(),
            theme: CanvasTheme::default(),
            typography: TypographySet::new(),
        }
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn store(&self) -> &SceneStore {
        &self.store
    }

    pub fn config(&self) -> &BoardConfig {
        self.store.config()
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn text_style(&self) -> &TextStyle {
        &self.text_style
    }

    /// Item in text-edit mode, if any.
    pub fn editing(&self) -> Option<ItemId> {
        match &self.gesture {
            Gesture::TextEdit { id, .. } => Some(*id),
            _ => None,
        }
    }

    pub fn typography(&self) -> &TypographySet {
        &self.typography
    }

    pub fn set_text_style(&mut self, style: TextStyle) {
        self.text_style = style;
    }

    pub fn set_font_family(&mut self, family: impl Into<String>) {
        self.text_style.font_family = family.into();
    }

    pub fn set_background(&mut self, background: BackgroundStyle) {
        self.background = background;
    }

    pub fn set_theme(&mut self, theme: CanvasTheme) {
        self.theme = theme;
    }

    // ─── Dispatch ────────────────────────────────────────────────────────

    /// The single mutation entry point.
    ///
    /// # Errors
    /// Whatever the store reports for the command.
    pub fn dispatch(&mut self, command: SceneCommand) -> SceneResult<CommandOutcome> {
        log::trace!("dispatch {command:?}");
        command.apply(&mut self.store)
    }

    // ─── Rendering ───────────────────────────────────────────────────────

    pub fn view_state(&self) -> ViewState {
        ViewState {
            zoom: self.zoom,
            editing: self.editing(),
            background: self.background.clone(),
            theme: self.theme.clone(),
        }
    }

    #[must_use]
    pub fn render(&self) -> VisualTree {
        render_scene(&self.store, &self.view_state())
    }

    // ─── Zoom ────────────────────────────────────────────────────────────

    /// Screen pixels → canvas-space.
    pub fn to_canvas(&self, screen: Point) -> Point {
        Point::new(screen.x / self.zoom, screen.y / self.zoom)
    }

    pub fn set_zoom(&mut self, zoom: f32) -> f32 {
        self.zoom = self.config().clamp_zoom(zoom);
        self.zoom
    }

    pub fn zoom_in(&mut self) -> f32 {
        self.set_zoom(self.zoom + self.config().zoom_step)
    }

    pub fn zoom_out(&mut self) -> f32 {
        self.set_zoom(self.zoom - self.config().zoom_step)
    }

    pub fn zoom_reset(&mut self) -> f32 {
        self.set_zoom(1.0)
    }

    // ─── Gesture lifecycle ───────────────────────────────────────────────

    /// End whatever gesture is active. A text edit is committed; the
    /// returned value says whether its item survived.
    pub fn end_gesture(&mut self) -> Option<TextCommit> {
        match std::mem::replace(&mut self.gesture, Gesture::Idle) {
            Gesture::TextEdit { id, .. } => match self.dispatch(SceneCommand::CommitText(id)) {
                Ok(CommandOutcome::Text(commit)) => {
                    if commit == TextCommit::Discarded {
                        log::debug!("abandoned text {id} discarded");
                    }
                    Some(commit)
                }
                Ok(_) => None,
                Err(e) => {
                    log::warn!("commit of {id} failed: {e}");
                    None
                }
            },
            Gesture::Idle | Gesture::Drag { .. } | Gesture::Resize { .. } => None,
        }
    }

    /// Hit-test a screen point against the current view.
    pub fn hit(&self, screen: Point) -> Option<Hit> {
        hit_test(&self.store, &self.view_state(), screen, self.config().handle_slop_px)
    }

    /// Pointer pressed on the canvas.
    pub fn pointer_down(&mut self, screen: Point) -> Option<Hit> {
        let hit = self.hit(screen);

        // Clicks inside the item being edited belong to the text field.
        if let (Some(hit), Some(editing)) = (hit, self.editing())
            && hit.id == editing
        {
            return Some(hit);
        }

        self.end_gesture();
        let pointer = self.to_canvas(screen);

        // The hit item may have been the abandoned text just discarded.
        let hit = hit.filter(|h| self.store.contains(h.id));

        match hit {
            Some(Hit {
                id,
                part: HitPart::Handle(handle),
            }) => {
                if let Some(item) = self.store.get(id) {
                    self.gesture = Gesture::Resize {
                        id,
                        handle,
                        start_size: item.size,
                        start_pointer: pointer,
                    };
                }
            }
            Some(Hit {
                id,
                part: HitPart::Body,
            }) => {
                let _ = self.dispatch(SceneCommand::Select(Some(id)));
                if let Some(item) = self.store.get(id) {
                    self.gesture = Gesture::Drag {
                        id,
                        start_pointer: pointer,
                        start_position: item.position,
                    };
                }
            }
            None => {
                let _ = self.dispatch(SceneCommand::Select(None));
            }
        }
        hit
    }

    /// Pointer moved. Only meaningful during drag/resize.
    pub fn pointer_move(&mut self, screen: Point) {
        let pointer = self.to_canvas(screen);
        let command = match &self.gesture {
            Gesture::Drag {
                id,
                start_pointer,
                start_position,
            } => SceneCommand::MoveTo {
                id: *id,
                to: start_position.offset(pointer.delta_from(*start_pointer)),
            },
            Gesture::Resize {
                id,
                handle,
                start_size,
                start_pointer,
            } => {
                // Handles are drawn rotated; size grows along the item's own axes.
                let delta = pointer.delta_from(*start_pointer);
                SceneCommand::Resize {
                    id: *id,
                    handle: *handle,
                    start: Some(*start_size),
                    delta: self.store.get(*id).map_or(delta, |item| local_delta(item, delta)),
                }
            }
            Gesture::Idle | Gesture::TextEdit { .. } => return,
        };

        if let Err(e) = self.dispatch(command) {
            // Item vanished mid-gesture (e.g. removed by another control).
            log::warn!("gesture aborted: {e}");
            self.gesture = Gesture::Idle;
        }
    }

    /// Pointer released anywhere. Ends drag/resize; text edits continue.
    pub fn pointer_up(&mut self) {
        if matches!(self.gesture, Gesture::Drag { .. } | Gesture::Resize { .. }) {
            self.gesture = Gesture::Idle;
        }
    }

    /// Double-click: enter edit mode on a text item.
    pub fn double_click(&mut self, screen: Point) -> Option<ItemId> {
        let hit = self.hit(screen)?;
        let is_text = self.store.get(hit.id).is_some_and(SceneItem::is_text);
        if !is_text {
            return None;
        }
        self.begin_text_edit(hit.id).ok()?;
        Some(hit.id)
    }

    // ─── Text ────────────────────────────────────────────────────────────

    /// Enter edit mode on a text item, selecting it.
    ///
    /// # Errors
    /// `NotFound` for absent ids, `NotText` for images.
    pub fn begin_text_edit(&mut self, id: ItemId) -> SceneResult<()> {
        if self.editing() == Some(id) {
            return Ok(());
        }
        self.end_gesture();
        let item = self.store.get(id).ok_or(SceneError::NotFound(id))?;
        let draft = item.text().ok_or(SceneError::NotText(id))?.text.clone();
        self.dispatch(SceneCommand::Select(Some(id)))?;
        self.gesture = Gesture::TextEdit { id, draft };
        Ok(())
    }

    /// Live keystroke in the active text editor.
    pub fn text_input(&mut self, text: &str) {
        let Gesture::TextEdit { id, draft } = &mut self.gesture else {
            return;
        };
        text.clone_into(draft);
        let command = SceneCommand::SetText {
            id: *id,
            text: text.to_string(),
        };
        if let Err(e) = self.dispatch(command) {
            log::warn!("text update dropped: {e}");
            self.gesture = Gesture::Idle;
        }
    }

    /// Blur or Escape in the text editor. A discarded item also clears the
    /// selection (the store drops it together with the item).
    pub fn end_text_edit(&mut self) -> Option<TextCommit> {
        if self.editing().is_some() {
            self.end_gesture()
        } else {
            None
        }
    }

    /// "Add text": a fresh empty block in edit mode.
    pub fn add_text(&mut self) -> Option<ItemId> {
        self.end_gesture();
        let style = self.text_style.clone();
        let id = self.dispatch(SceneCommand::AddText(style)).ok()?.added()?;
        self.begin_text_edit(id).ok()?;
        Some(id)
    }

    // ─── Typography ──────────────────────────────────────────────────────

    /// Typography pick on the image under `screen`: collects the standard
    /// preset ramp. Returns how many presets were new, or `None` when no
    /// image is there.
    pub fn extract_typography(&mut self, screen: Point) -> Option<usize> {
        let hit = self.hit(screen)?;
        let item = self.store.get(hit.id).filter(|item| !item.is_text())?;
        let added = self.typography.merge(standard_presets());
        log::debug!("typography from {}: {added} new preset(s)", item.id);
        Some(added)
    }

    /// Use a collected preset for new text blocks. The font color is kept.
    pub fn apply_typography(&mut self, index: usize) -> bool {
        let Some(preset) = self.typography.get(index) else {
            return false;
        };
        self.text_style = preset.to_text_style(self.text_style.font_color);
        true
    }

    // ─── Item actions ────────────────────────────────────────────────────

    /// Add an image (or any item) without changing the selection.
    pub fn add_item(&mut self, item: NewItem) -> Option<ItemId> {
        self.dispatch(SceneCommand::Add(item)).ok()?.added()
    }

    pub fn delete_selected(&mut self) -> Option<ItemId> {
        let id = self.store.selected()?;
        self.end_gesture();
        let _ = self.dispatch(SceneCommand::Remove(id));
        Some(id)
    }

    pub fn duplicate_selected(&mut self) -> Option<ItemId> {
        let id = self.store.selected()?;
        self.dispatch(SceneCommand::Duplicate(id)).ok()?.added()
    }

    pub fn rotate_selected(&mut self) -> Option<f32> {
        let id = self.store.selected()?;
        let degrees = self.config().rotate_step;
        match self.dispatch(SceneCommand::Rotate { id, degrees }) {
            Ok(CommandOutcome::Rotated(r)) => Some(r),
            _ => None,
        }
    }

    /// Grid auto-arrange inside a container of the given screen width.
    pub fn arrange_grid(&mut self, container_width: f32) {
        self.end_gesture();
        let _ = self.dispatch(SceneCommand::ArrangeGrid { container_width });
    }

    /// Remove everything. The caller is responsible for confirming first.
    pub fn clear_all(&mut self) {
        self.gesture = Gesture::Idle;
        let _ = self.dispatch(SceneCommand::ClearAll);
    }

    // ─── Keyboard ────────────────────────────────────────────────────────

    /// Handle a key press. Returns the action taken, if any.
    ///
    /// While a text edit is active only Escape is intercepted; every other
    /// key belongs to the text field.
    pub fn key_down(&mut self, key: &str, modifiers: Modifiers) -> Option<ShortcutAction> {
        let action = ShortcutMap::resolve(key, modifiers.ctrl, modifiers.shift, modifiers.alt, modifiers.meta)?;

        if self.editing().is_some() {
            if action == ShortcutAction::Deselect {
                self.end_text_edit();
                return Some(action);
            }
            return None;
        }

        match action {
            ShortcutAction::Deselect => {
                self.end_gesture();
                let _ = self.dispatch(SceneCommand::Select(None));
            }
            ShortcutAction::Delete => {
                self.delete_selected()?;
            }
            ShortcutAction::Duplicate => {
                self.duplicate_selected()?;
            }
            ShortcutAction::Rotate => {
                self.rotate_selected()?;
            }
            ShortcutAction::AddText => {
                self.add_text()?;
            }
            ShortcutAction::ArrangeGrid => {
                let width = self.config().canvas_size.width;
                self.arrange_grid(width);
            }
            ShortcutAction::ZoomIn => {
                self.zoom_in();
            }
            ShortcutAction::ZoomOut => {
                self.zoom_out();
            }
            ShortcutAction::ZoomReset => {
                self.zoom_reset();
            }
        }
        Some(action)
    }

    /// Feed a normalized input event.
    pub fn handle(&mut self, event: &InputEvent) {
        match event {
            InputEvent::PointerDown { x, y } => {
                self.pointer_down(Point::new(*x, *y));
            }
            InputEvent::PointerMove { x, y } => self.pointer_move(Point::new(*x, *y)),
            InputEvent::PointerUp => self.pointer_up(),
            InputEvent::DoubleClick { x, y } => {
                self.double_click(Point::new(*x, *y));
            }
            InputEvent::Key { key, modifiers } => {
                self.key_down(key, *modifiers);
            }
            InputEvent::TextInput(text) => self.text_input(text),
            InputEvent::Blur => {
                self.end_text_edit();
            }
        }
    }
}
