// src/display/drivers/mock.rs

use crate::display::driver::DisplayDriver;
use crate::display::messages::DisplayEvent;
use crate::raster::{DrawRegion, Framebuffer};
use anyhow::{bail, Result};
use std::collections::VecDeque;

/// Scripted driver for shell tests: replays queued events and records frames.
pub struct MockDisplayDriver {
    region: DrawRegion,
    events: VecDeque<DisplayEvent>,
    presented: Vec<Framebuffer>,
    titles: Vec<String>,
}

impl MockDisplayDriver {
    pub fn new(region: DrawRegion) -> Self {
        Self {
            region,
            events: VecDeque::new(),
            presented: Vec::new(),
            titles: Vec::new(),
        }
    }

    pub fn push_event(&mut self, event: DisplayEvent) {
        self.events.push_back(event);
    }

    pub fn presented(&self) -> &[Framebuffer] {
        &self.presented
    }

    pub fn titles(&self) -> &[String] {
        &self.titles
    }
}

impl DisplayDriver for MockDisplayDriver {
    fn draw_region(&self) -> DrawRegion {
        self.region
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        self.titles.push(title.to_string());
        Ok(())
    }

    fn next_event(&mut self) -> Result<DisplayEvent> {
        match self.events.pop_front() {
            Some(event) => Ok(event),
            None => bail!("mock driver ran out of events"),
        }
    }

    fn present(&mut self, frame: &Framebuffer) -> Result<()> {
        self.presented.push(frame.clone());
        Ok(())
    }
}
