//! Rendering surfaces.
//!
//! A surface turns the current `RefreshState` into output. `View` is the
//! surface-independent model (loading / failed / ready) every surface renders
//! from; `TerminalSurface` writes it as plain text.

pub mod terminal;
pub mod view;

pub use terminal::TerminalSurface;
pub use view::{HistoryRow, PriceCard, View, ViewOptions};

use crate::refresh::RefreshState;
use tokio::sync::watch;

pub trait Surface {
    fn render(&mut self, state: &RefreshState) -> std::io::Result<()>;
}

/// Render the current state, then re-render on every change until the
/// holder behind `rx` is dropped.
pub async fn drive<S: Surface>(
    surface: &mut S,
    mut rx: watch::Receiver<RefreshState>,
) -> std::io::Result<()> {
    let state = rx.borrow_and_update().clone();
    surface.render(&state)?;

    while rx.changed().await.is_ok() {
        let state = rx.borrow_and_update().clone();
        surface.render(&state)?;
    }
    Ok(())
}
