//! Orchestration of an ordered tag processor chain

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

use crate::preset::{VideoPreset, VideoUpload};
use crate::tag_processing::autonum::AutoNumTagProcessor;
use crate::tag_processing::filename::FileNameTagProcessor;
use crate::tag_processing::playlist::PlaylistTagProcessor;
use crate::tag_processing::traits::TagProcessor;
use crate::utils::Result;
use crate::youtube::PlaylistResolver;

/// Ordered chain of tag processors
///
/// Each processor receives the output of the one before it. A pipeline is
/// good for one preset application; build a new one for the next batch.
pub struct TagPipeline {
    processors: Vec<Box<dyn TagProcessor>>,
}

impl TagPipeline {
    pub fn new(processors: Vec<Box<dyn TagProcessor>>) -> Self {
        Self { processors }
    }

    /// The standard processor chain: playlist, auto number, file name
    pub fn with_defaults(resolver: Arc<dyn PlaylistResolver>) -> Self {
        Self::new(vec![
            Box::new(PlaylistTagProcessor::new(resolver)),
            Box::new(AutoNumTagProcessor::new()),
            Box::new(FileNameTagProcessor::new()),
        ])
    }

    pub fn processor_names(&self) -> Vec<&'static str> {
        self.processors.iter().map(|p| p.processor_name()).collect()
    }

    /// Initialize every processor with the preset being applied
    pub fn init(&mut self, preset: &VideoPreset, initial_auto_num: u32) -> Result<()> {
        for processor in &mut self.processors {
            debug!("Initializing {}", processor.processor_name());
            processor.init(preset, initial_auto_num)?;
        }
        Ok(())
    }

    /// Thread one upload's fields through every processor
    pub fn process(&mut self, mut upload: VideoUpload) -> Result<VideoUpload> {
        for processor in &mut self.processors {
            let file = upload.video_file.as_path();
            upload.title = processor.process_title(&upload.title, file)?;
            upload.description = processor.process_description(&upload.description, file)?;
            upload.tags = processor.process_tags(std::mem::take(&mut upload.tags), file)?;
        }
        debug!("Processed {:?} -> {:?}", upload.video_file, upload.title);
        Ok(upload)
    }

    /// Initialize with `preset` and process one upload per file, in order
    pub fn apply_preset<P: AsRef<Path>>(
        &mut self,
        preset: &VideoPreset,
        files: &[P],
        initial_auto_num: u32,
    ) -> Result<Vec<VideoUpload>> {
        self.init(preset, initial_auto_num)?;

        let uploads = files
            .iter()
            .map(|file| self.process(VideoUpload::from_preset(preset, file.as_ref())))
            .collect::<Result<Vec<_>>>()?;

        info!(
            "Applied preset '{}' to {} videos ({} processors)",
            preset.name,
            uploads.len(),
            self.processors.len()
        );
        Ok(uploads)
    }
}

/// Convenience wrapper: apply `preset` to `files` with the default chain
pub fn apply_preset(
    resolver: Arc<dyn PlaylistResolver>,
    preset: &VideoPreset,
    files: &[PathBuf],
    initial_auto_num: u32,
) -> Result<Vec<VideoUpload>> {
    TagPipeline::with_defaults(resolver).apply_preset(preset, files, initial_auto_num)
}
