// src/gui/actions/export.rs
use crate::{file, gui::app::App};

pub fn export(app: &mut App) {
    // normalize out_path first (mutates app) before any &app borrows
    if app.out_path_dirty {
        app.state.options.export.set_path(&app.out_path_text);
        logf!(
            "Export: Out path set → {}",
            app.state.options.export.out_path().display()
        );
    }

    let text = match super::current_text(app) {
        Ok(t) => t,
        Err(msg) => {
            logd!("Export: {}", msg);
            return app.status(msg);
        }
    };

    let path = app.state.options.export.out_path();
    logf!("Export: Begin {} → {}", app.current_kind(), path.display());

    let status_msg = match file::write_export(&path, &text) {
        Ok(()) => {
            logf!("Export: OK {}", path.display());
            format!("Exported {}", path.display())
        }
        Err(e) => {
            loge!("Export: Error {}: {}", path.display(), e);
            format!("Export error: {e}")
        }
    };

    // Reflect the extension the format imposes.
    app.out_path_text = path.to_string_lossy().into_owned();
    app.status(status_msg);
}
