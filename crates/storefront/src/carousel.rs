//! Rotating promotional banner.

use serde::{Deserialize, Serialize};

/// One promotional slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    pub title: String,
    pub subtitle: String,
    pub image: String,
    pub features: Vec<String>,
    pub badge: String,
}

/// Slides plus the index of the one currently shown.
#[derive(Debug, Clone, Default)]
pub struct PromoCarousel {
    slides: Vec<Slide>,
    current: usize,
}

impl PromoCarousel {
    /// A carousel over `slides`, starting at the first one.
    #[must_use]
    pub const fn new(slides: Vec<Slide>) -> Self {
        Self { slides, current: 0 }
    }

    /// The store's standard promotions.
    #[must_use]
    pub fn standard() -> Self {
        let slide = |title: &str, subtitle: &str, image: &str, features: [&str; 2], badge: &str| {
            Slide {
                title: title.to_string(),
                subtitle: subtitle.to_string(),
                image: image.to_string(),
                features: features.iter().map(ToString::to_string).collect(),
                badge: badge.to_string(),
            }
        };

        Self::new(vec![
            slide(
                "GAMING SERIES 17\"",
                "High performance gaming laptops",
                "https://images.unsplash.com/photo-1593642702821-c8da6771f0c6?w=600&h=400&fit=crop",
                ["17-inch 100% sRGB display", "Backlit RGB mechanical keyboard"],
                "GAMING",
            ),
            slide(
                "MEGA SALE",
                "Special offers on audio gear",
                "https://images.unsplash.com/photo-1583394838336-acd977736f90?w=600&h=400&fit=crop",
                ["Premium sound quality", "Wireless connectivity"],
                "AUDIO",
            ),
            slide(
                "LAPTOPS PRO",
                "MacBooks and professional laptops",
                "https://images.unsplash.com/photo-1486312338219-ce68d2c6f44d?w=600&h=400&fit=crop",
                ["Latest generation processors", "Ultra thin design"],
                "PRO",
            ),
            slide(
                "TECH INNOVATION",
                "Cutting edge technology",
                "https://images.unsplash.com/photo-1518770660439-4636190af475?w=600&h=400&fit=crop",
                ["High tech components", "Exceptional performance"],
                "TECH",
            ),
            slide(
                "WORKSPACE",
                "Modern workspaces",
                "https://images.unsplash.com/photo-1581091226825-a6a2a5aee158?w=600&h=400&fit=crop",
                ["Complete professional setup", "Maximum productivity"],
                "WORK",
            ),
        ])
    }

    /// The slide currently shown, if there are any slides.
    #[must_use]
    pub fn current(&self) -> Option<&Slide> {
        self.slides.get(self.current)
    }

    /// Index of the current slide.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.current
    }

    /// Number of slides.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Returns true if there are no slides.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Advance to the next slide, wrapping to the first.
    pub fn next(&mut self) {
        if !self.slides.is_empty() {
            self.current = (self.current + 1) % self.slides.len();
        }
    }

    /// Go back one slide, wrapping to the last.
    pub fn previous(&mut self) {
        if !self.slides.is_empty() {
            self.current = (self.current + self.slides.len() - 1) % self.slides.len();
        }
    }

    /// Jump to `index`; out-of-range indices are ignored.
    pub fn go_to(&mut self, index: usize) {
        if index < self.slides.len() {
            self.current = index;
        }
    }
}
