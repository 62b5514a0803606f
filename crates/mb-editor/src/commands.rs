//! Scene commands: the single entry point for store mutations.
//!
//! Every UI gesture, shortcut and bridge call is expressed as a
//! `SceneCommand` and applied through [`SceneCommand::apply`], so there is
//! exactly one place where the scene changes.

use mb_core::error::SceneResult;
use mb_core::id::ItemId;
use mb_core::model::*;
use mb_core::store::{SceneStore, TextCommit};

#[derive(Debug, Clone, PartialEq)]
pub enum SceneCommand {
    Add(NewItem),
    /// Empty text block with the given typography.
    AddText(TextStyle),
    Remove(ItemId),
    Duplicate(ItemId),
    Select(Option<ItemId>),
    MoveTo {
        id: ItemId,
        to: Point,
    },
    /// Resize from `start` (or the current size when `None`) by `delta`.
    Resize {
        id: ItemId,
        handle: ResizeHandle,
        start: Option<Size>,
        delta: Vector,
    },
    Rotate {
        id: ItemId,
        degrees: f32,
    },
    SetText {
        id: ItemId,
        text: String,
    },
    SetTextStyle {
        id: ItemId,
        style: TextStyle,
    },
    CommitText(ItemId),
    ArrangeGrid {
        container_width: f32,
    },
    ClearAll,
}

/// What a command did, for callers that need the result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CommandOutcome {
    Done,
    Added(ItemId),
    Selected(Option<ItemId>),
    Removed(bool),
    Resized(Size),
    Rotated(f32),
    Text(TextCommit),
}

impl CommandOutcome {
    /// The id a creating command produced.
    pub fn added(self) -> Option<ItemId> {
        match self {
            Self::Added(id) => Some(id),
            _ => None,
        }
    }
}

impl SceneCommand {
    /// Apply to the store.
    ///
    /// # Errors
    /// Propagates `NotFound`/`NotText` from the store.
    pub fn apply(self, store: &mut SceneStore) -> SceneResult<CommandOutcome> {
        Ok(match self {
            Self::Add(item) => CommandOutcome::Added(store.add(item)),
            Self::AddText(style) => CommandOutcome::Added(store.add_text(&style)),
            Self::Remove(id) => CommandOutcome::Removed(store.remove(id).is_some()),
            Self::Duplicate(id) => CommandOutcome::Added(store.duplicate(id)?),
            Self::Select(id) => CommandOutcome::Selected(store.select(id)),
            Self::MoveTo { id, to } => {
                store.move_to(id, to)?;
                CommandOutcome::Done
            }
            Self::Resize {
                id,
                handle,
                start: Some(start),
                delta,
            } => CommandOutcome::Resized(store.resize_from(id, handle, start, delta)?),
            Self::Resize {
                id,
                handle,
                start: None,
                delta,
            } => CommandOutcome::Resized(store.resize(id, handle, delta)?),
            Self::Rotate { id, degrees } => CommandOutcome::Rotated(store.rotate(id, degrees)?),
            Self::SetText { id, text } => {
                store.set_text(id, &text)?;
                CommandOutcome::Done
            }
            Self::SetTextStyle { id, style } => {
                store.set_text_style(id, style)?;
                CommandOutcome::Done
            }
            Self::CommitText(id) => CommandOutcome::Text(store.commit_text(id)?),
            Self::ArrangeGrid { container_width } => {
                store.arrange_grid(container_width);
                CommandOutcome::Done
            }
            Self::ClearAll => {
                store.clear_all();
                CommandOutcome::Done
            }
        })
    }
}
