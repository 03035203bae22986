use std::time::Duration;

use moonraker_thumbnail::{MoonrakerConfig, ThumbnailImage};

/// Fetches the preview for `file_name` without blocking the async runtime.
///
/// The blocking pipeline runs on the blocking thread pool. When `deadline`
/// expires first the worker is abandoned and its result is dropped. The
/// HTTP timeouts are capped at `deadline` so an abandoned worker cannot
/// outlive it by more than one request.
pub async fn fetch_preview(
    mut config: MoonrakerConfig,
    file_name: String,
    deadline: Duration,
) -> Option<ThumbnailImage> {
    config.request_timeout = config.request_timeout.min(deadline);
    config.connect_timeout = config.connect_timeout.min(deadline);

    let name = file_name.clone();
    let task = tokio::task::spawn_blocking(move || {
        moonraker_thumbnail::fetch_thumbnail(&config, &file_name)
    });

    match tokio::time::timeout(deadline, task).await {
        Ok(Ok(image)) => image,
        Ok(Err(e)) => {
            log::error!("Thumbnail task for '{}' failed: {}", name, e);
            None
        }
        Err(_) => {
            log::warn!(
                "Thumbnail fetch for '{}' timed out after {:?}",
                name,
                deadline
            );
            None
        }
    }
}
