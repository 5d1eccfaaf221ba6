#![forbid(unsafe_code)]

//! `mapmark` is a headless map-annotation editor.
//!
//! It re-exports the marker model from `mapmark-core` and adds the interactive layer on top:
//! per-kind style editors with live previews, the element and merge dialogs, and a [`Session`]
//! that keeps the marker collection and a [`MapEngine`] in sync.
//!
//! ```
//! use mapmark::{EditorConfig, HeadlessMap, Session};
//!
//! let mut session = Session::new(HeadlessMap::default(), EditorConfig::default());
//! let id = session.add_marker();
//! session.on_click(id).unwrap().label_mut().apply_preset(mapmark::LabelPreset::UBahn);
//! session.save_dialog().unwrap();
//! assert!(session.export_json().unwrap().contains("\"U1\""));
//! ```

pub mod dialog;
pub mod editor;
pub mod headless;
pub mod session;

pub use mapmark_core::*;

pub use dialog::{DialogOutcome, ElementDialog, MergeDialog};
pub use editor::{
    ChangeListener, IconEditor, IconPreset, LabelEditor, LabelPreset, LayoutEditor, StyleEditor,
};
pub use headless::HeadlessMap;
pub use session::Session;

pub mod render {
    pub use mapmark_render::codec::{decode, decode_style, encode};
    pub use mapmark_render::html;
    pub use mapmark_render::{
        Error, RENDER_ERROR_PLACEHOLDER, Result, StyleEntry, StyleRegistry, render_style,
    };
}

#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error(transparent)]
    Model(#[from] mapmark_core::Error),
    #[error("no element dialog is open")]
    NoActiveDialog,
    #[error("no merge is pending")]
    NoPendingMerge,
    #[error("no layout entry with id {id}")]
    UnknownItem { id: ItemId },
    #[error("no nested layout entry is being edited")]
    NoNestedEdit,
}

pub type Result<T> = std::result::Result<T, EditorError>;
