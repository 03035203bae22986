use crate::download::download_thumbnail;
use crate::locate::locate_thumbnail;
use crate::models::{MoonrakerConfig, ThumbnailDescriptor, ThumbnailImage};
use crate::transport::Transport;

#[cfg(feature = "http")]
use crate::transport::ReqwestTransport;

/// Thumbnail pipeline bound to one print server and one transport.
///
/// Holds no state between calls; every image it returns is a fresh buffer
/// owned by the caller.
pub struct ThumbnailService<T: Transport> {
    config: MoonrakerConfig,
    transport: T,
}

impl<T: Transport> ThumbnailService<T> {
    pub fn new(config: MoonrakerConfig, transport: T) -> Self {
        Self { config, transport }
    }

    /// Finds the preview to show for `file_name`, if any
    pub fn locate(&self, file_name: &str) -> Option<ThumbnailDescriptor> {
        match locate_thumbnail(&self.config, &self.transport, file_name) {
            Ok(descriptor) => Some(descriptor),
            Err(e) => {
                log::warn!("Failed to locate gcode thumb for '{}': {}", file_name, e);
                None
            }
        }
    }

    /// Downloads the preview described by `descriptor`
    pub fn download(&self, descriptor: &ThumbnailDescriptor) -> Option<ThumbnailImage> {
        match download_thumbnail(&self.config, &self.transport, descriptor) {
            Ok(image) => Some(image),
            Err(e) => {
                log::warn!(
                    "Failed to fetch gcode thumb '{}': {}",
                    descriptor.thumbnail_path,
                    e
                );
                None
            }
        }
    }

    /// Locate, then download. `None` means no thumbnail is available.
    pub fn fetch_thumbnail(&self, file_name: &str) -> Option<ThumbnailImage> {
        let descriptor = self.locate(file_name)?;
        self.download(&descriptor)
    }
}

/// Runs the pipeline once over a new blocking HTTP client
#[cfg(feature = "http")]
pub fn fetch_thumbnail(config: &MoonrakerConfig, file_name: &str) -> Option<ThumbnailImage> {
    let transport = match ReqwestTransport::new(config) {
        Ok(transport) => transport,
        Err(e) => {
            log::warn!("Failed to fetch gcode thumb for '{}': {}", file_name, e);
            return None;
        }
    };

    ThumbnailService::new(config.clone(), transport).fetch_thumbnail(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{thumbnails_body, ScriptedTransport};

    fn service(transport: &ScriptedTransport) -> ThumbnailService<&ScriptedTransport> {
        ThumbnailService::new(MoonrakerConfig::new("printer.local", 7125), transport)
    }

    #[test]
    fn test_fetch_thumbnail_locates_then_downloads() {
        let transport = ScriptedTransport::new()
            .respond(
                200,
                thumbnails_body(&[
                    (64, 64, 5000, ".thumbs/a.png"),
                    (32, 32, 9000, ".thumbs/b.png"),
                    (64, 64, 8000, ".thumbs/c.png"),
                ]),
            )
            .respond(200, vec![0xAB; 9000]);

        let image = service(&transport).fetch_thumbnail("part.gcode").unwrap();
        assert_eq!(image.width_height(), 32);
        assert_eq!(image.size(), 9000);
        assert_eq!(image.data().len(), 9000);

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert!(requests[0].contains("/server/files/thumbnails?filename=part.gcode"));
        assert!(requests[1].ends_with("/server/files/gcodes/.thumbs/b.png"));
    }

    #[test]
    fn test_empty_file_name_yields_none_without_requests() {
        let transport = ScriptedTransport::new();
        assert!(service(&transport).fetch_thumbnail("").is_none());
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn test_no_eligible_candidate_skips_download() {
        let transport = ScriptedTransport::new().respond(
            200,
            thumbnails_body(&[(64, 64, 12000, "big.png"), (128, 128, 500, "wide.png")]),
        );

        assert!(service(&transport).fetch_thumbnail("part.gcode").is_none());
        assert_eq!(transport.requests().len(), 1);
    }

    #[test]
    fn test_zero_or_negative_edge_candidates_yield_none() {
        for body in [
            r#"{"result":[{"width":0,"height":0,"size":4,"thumbnail_path":"a.png"}]}"#,
            r#"{"result":[{"width":-4,"height":-4,"size":4,"thumbnail_path":"a.png"}]}"#,
        ] {
            let transport = ScriptedTransport::new()
                .respond(200, body)
                .respond(200, vec![1, 2, 3, 4]);

            assert!(service(&transport).fetch_thumbnail("part.gcode").is_none());
            assert_eq!(transport.requests().len(), 1);
        }
    }

    #[test]
    fn test_empty_candidate_list_yields_none() {
        let transport = ScriptedTransport::new().respond(200, r#"{"result": []}"#);
        assert!(service(&transport).fetch_thumbnail("part.gcode").is_none());
    }

    #[test]
    fn test_failed_download_yields_none() {
        let transport = ScriptedTransport::new()
            .respond(200, thumbnails_body(&[(32, 32, 900, ".thumbs/a.png")]))
            .respond(404, "gone");

        assert!(service(&transport).fetch_thumbnail("part.gcode").is_none());
        assert_eq!(transport.requests().len(), 2);
    }

    #[test]
    fn test_metadata_failure_yields_none() {
        let transport = ScriptedTransport::new().respond(503, "busy");
        assert!(service(&transport).fetch_thumbnail("part.gcode").is_none());

        let transport = ScriptedTransport::new().fail("connection refused");
        assert!(service(&transport).fetch_thumbnail("part.gcode").is_none());
    }

    #[test]
    fn test_each_call_returns_an_independent_buffer() {
        let transport = ScriptedTransport::new()
            .respond(200, thumbnails_body(&[(32, 32, 4, ".thumbs/a.png")]))
            .respond(200, vec![1, 1, 1, 1])
            .respond(200, thumbnails_body(&[(32, 32, 4, ".thumbs/a.png")]))
            .respond(200, vec![2, 2, 2, 2]);
        let service = service(&transport);

        let first = service.fetch_thumbnail("part.gcode").unwrap();
        let second = service.fetch_thumbnail("part.gcode").unwrap();
        assert_eq!(first.data(), &[1, 1, 1, 1]);
        assert_eq!(second.data(), &[2, 2, 2, 2]);
    }
}
