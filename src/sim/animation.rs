//! Sprite-strip animation state
//!
//! An animator walks left to right across a horizontal strip of frames,
//! holding each frame for `frame_delay + 1` ticks before moving on.

use serde::{Deserialize, Serialize};

/// Frame counter for one animated actor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Animator {
    frame_index: u32,
    frame_counter: u32,
    max_frames: u32,
    frame_delay: u32,
}

impl Animator {
    /// A strip must have at least one frame; zero is treated as one.
    pub fn new(max_frames: u32, frame_delay: u32) -> Self {
        Self {
            frame_index: 0,
            frame_counter: 0,
            max_frames: max_frames.max(1),
            frame_delay,
        }
    }

    #[inline]
    pub fn frame_index(&self) -> u32 {
        self.frame_index
    }

    #[inline]
    pub fn frame_counter(&self) -> u32 {
        self.frame_counter
    }

    #[inline]
    pub fn max_frames(&self) -> u32 {
        self.max_frames
    }

    #[inline]
    pub fn frame_delay(&self) -> u32 {
        self.frame_delay
    }

    /// Advance one tick. Returns true when the strip wrapped back to frame 0.
    pub fn advance(&mut self) -> bool {
        self.frame_counter += 1;
        if self.frame_counter > self.frame_delay {
            self.frame_counter = 0;
            self.frame_index += 1;
        }
        if self.frame_index >= self.max_frames {
            self.frame_index = 0;
            return true;
        }
        false
    }

    /// Restart the strip (used when an effect is retriggered)
    pub fn reset(&mut self) {
        self.frame_index = 0;
        self.frame_counter = 0;
    }

    /// Jump to a frame, wrapping out-of-range values
    pub fn set_frame(&mut self, frame: u32) {
        self.frame_index = frame % self.max_frames;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_holds_frame_for_delay_plus_one_ticks() {
        let mut anim = Animator::new(3, 2);
        // Counter runs 1, 2, then exceeds delay on the third tick
        assert!(!anim.advance());
        assert!(!anim.advance());
        assert_eq!(anim.frame_index(), 0);
        assert!(!anim.advance());
        assert_eq!(anim.frame_index(), 1);
        assert_eq!(anim.frame_counter(), 0);
    }

    #[test]
    fn test_wraps_after_last_frame() {
        let mut anim = Animator::new(2, 0);
        assert!(!anim.advance());
        assert_eq!(anim.frame_index(), 1);
        assert!(anim.advance());
        assert_eq!(anim.frame_index(), 0);
    }

    #[test]
    fn test_single_frame_strip_never_leaves_zero() {
        let mut anim = Animator::new(1, 0);
        for _ in 0..10 {
            anim.advance();
            assert_eq!(anim.frame_index(), 0);
        }
    }

    #[test]
    fn test_reset_and_set_frame() {
        let mut anim = Animator::new(8, 1);
        for _ in 0..7 {
            anim.advance();
        }
        assert_ne!(anim.frame_index(), 0);
        anim.reset();
        assert_eq!(anim.frame_index(), 0);
        assert_eq!(anim.frame_counter(), 0);

        anim.set_frame(11);
        assert_eq!(anim.frame_index(), 3);
    }

    #[test]
    fn test_frame_index_stays_in_range() {
        let mut anim = Animator::new(5, 3);
        for _ in 0..1000 {
            anim.advance();
            assert!(anim.frame_index() < anim.max_frames());
            assert!(anim.frame_counter() <= anim.frame_delay());
        }
    }
}
