use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, channel};

use verdant_runtime::CancelFlag;

/// Watches `path` on a background thread. Every change cancels the generation
/// in flight and sends a unit message.
pub fn spawn_config_watcher(path: &Path, cancel: CancelFlag) -> Receiver<()> {
    let (tx, rx) = channel::<()>();
    let path: PathBuf = path.to_path_buf();
    std::thread::spawn(move || {
        use notify::{EventKind, RecursiveMode, Watcher};
        let watcher = notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| {
            if let Ok(event) = res {
                match event.kind {
                    EventKind::Modify(_)
                    | EventKind::Create(_)
                    | EventKind::Remove(_)
                    | EventKind::Any => {
                        cancel.cancel();
                        let _ = tx.send(());
                    }
                    _ => {}
                }
            }
        });
        match watcher {
            Ok(mut watcher) => {
                if let Err(e) = watcher.watch(&path, RecursiveMode::NonRecursive) {
                    log::warn!("cannot watch {}: {}", path.display(), e);
                    return;
                }
                loop {
                    std::thread::sleep(std::time::Duration::from_secs(3600));
                }
            }
            Err(e) => log::warn!("file watcher unavailable: {}", e),
        }
    });
    rx
}
