//! Interactive session: the event/redraw loop.
//!
//! A [`Session`] owns the loaded catalog, one [`ViewTransform`], the planner
//! and a redraw flag. Each loop iteration:
//!
//! 1. If the flag is set, plan a frame and hand it to the [`Renderer`].
//! 2. Poll the [`InputSource`] and apply every resulting [`Command`].
//!
//! Planning only happens after a pan, zoom or reset; the first frame is
//! always drawn.

use tracing::{debug, info};

use crate::input::{Command, Controls, InputEvent, InputSource};
use crate::{Frame, RenderPlanner, ResetPolicy, StarRecord, ViewTransform};

/// Draws planned frames.
pub trait Renderer {
    fn present(&mut self, frame: &Frame<'_>) -> anyhow::Result<()>;
}

/// State of one interactive starmap view.
pub struct Session {
    stars: Vec<StarRecord>,
    view: ViewTransform,
    planner: RenderPlanner,
    controls: Controls,
    reset_policy: ResetPolicy,
    needs_redraw: bool,
    running: bool,
    frames: u64,
}

impl Session {
    pub fn new(stars: Vec<StarRecord>, planner: RenderPlanner) -> Self {
        Self {
            stars,
            view: ViewTransform::default(),
            planner,
            controls: Controls::default(),
            reset_policy: ResetPolicy::default(),
            needs_redraw: true,
            running: true,
            frames: 0,
        }
    }

    pub fn with_controls(mut self, controls: Controls) -> Self {
        self.controls = controls;
        self
    }

    pub fn with_reset_policy(mut self, policy: ResetPolicy) -> Self {
        self.reset_policy = policy;
        self
    }

    pub fn with_view(mut self, view: ViewTransform) -> Self {
        self.view = view;
        self.needs_redraw = true;
        self
    }

    pub fn stars(&self) -> &[StarRecord] {
        &self.stars
    }

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Number of frames presented so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Apply one command to the view. Every command except quit and a
    /// rejected zoom requests a redraw.
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Zoom(factor) => {
                if !self.view.zoom_at_center(factor, self.planner.viewport()) {
                    debug!("Zoom by {} out of range at scale {}", factor, self.view.scale);
                    return;
                }
            }
            Command::Pan { dx, dy } => self.view.translate(dx, dy),
            Command::Reset => self.view.reset(self.reset_policy),
            Command::Quit => {
                self.running = false;
                return;
            }
        }
        self.needs_redraw = true;
    }

    pub fn handle_event(&mut self, event: &InputEvent) {
        if let Some(command) = self.controls.command_for(event) {
            debug!("{:?} -> {:?}", event, command);
            self.apply(command);
        }
    }

    /// Plan the current frame without touching the redraw flag.
    pub fn plan(&self) -> Frame<'_> {
        self.planner.plan(&self.stars, &self.view)
    }

    /// Present a frame if one is pending. Returns whether it drew.
    pub fn redraw_if_needed<R>(&mut self, renderer: &mut R) -> anyhow::Result<bool>
    where
        R: Renderer + ?Sized,
    {
        if !self.needs_redraw {
            return Ok(false);
        }
        let frame = self.planner.plan(&self.stars, &self.view);
        renderer.present(&frame)?;
        self.needs_redraw = false;
        self.frames += 1;
        Ok(true)
    }

    /// Run until the input source asks to quit.
    pub fn run<I, R>(&mut self, input: &mut I, renderer: &mut R) -> anyhow::Result<()>
    where
        I: InputSource + ?Sized,
        R: Renderer + ?Sized,
    {
        info!("Starting session with {} stars", self.stars.len());
        while self.running {
            self.redraw_if_needed(renderer)?;
            for event in input.poll()? {
                self.handle_event(&event);
                if !self.running {
                    break;
                }
            }
        }
        info!("Session ended after {} frames", self.frames);
        Ok(())
    }
}
