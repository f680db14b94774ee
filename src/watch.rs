//! Config hot reload: a notify watcher thread feeding a channel.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, channel};
use std::time::Duration;

use isosculpt_runtime::Sculptor;
use isosculpt_world::load_config_from_path;

/// Spawns a watcher on `path`; one `()` arrives per change event.
pub fn spawn_config_watcher(path: PathBuf) -> Receiver<()> {
    let (tx, rx) = channel::<()>();
    std::thread::spawn(move || {
        use notify::{EventKind, RecursiveMode, Watcher};
        match notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| {
            if let Ok(event) = res {
                match event.kind {
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Any => {
                        let _ = tx.send(());
                    }
                    _ => {}
                }
            }
        }) {
            Ok(mut watcher) => {
                if let Err(e) = watcher.watch(&path, RecursiveMode::NonRecursive) {
                    log::warn!("cannot watch {}: {}", path.display(), e);
                    return;
                }
                log::info!("watching {} for changes", path.display());
                loop {
                    std::thread::sleep(Duration::from_secs(3600));
                }
            }
            Err(e) => log::warn!("config watcher unavailable: {}", e),
        }
    });
    rx
}

/// Drains pending change events and reloads once. Returns true when the
/// sculptor was rebuilt from the new file.
pub fn process_config_events(rx: &Receiver<()>, path: &Path, s: &mut Sculptor) -> bool {
    let mut changed = false;
    for _ in rx.try_iter() {
        changed = true;
    }
    if !changed {
        return false;
    }
    reload_from(path, s)
}

pub fn reload_from(path: &Path, s: &mut Sculptor) -> bool {
    if !path.exists() {
        log::warn!("config missing: {}", path.display());
        return false;
    }
    let cfg = match load_config_from_path(path) {
        Ok(cfg) => cfg,
        Err(e) => {
            log::warn!("config reload failed ({}): {}", path.display(), e);
            return false;
        }
    };
    match s.reload_config(cfg) {
        Ok(()) => {
            log::info!("config reloaded from {}", path.display());
            true
        }
        Err(e) => {
            log::warn!("config rejected ({}): {}", path.display(), e);
            false
        }
    }
}
