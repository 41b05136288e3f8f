//! "Did you know?" trivia for the win screen.

pub const WICHITA_FACTS: [&str; 8] = [
    "Wichita calls itself the Air Capital of the World; more aircraft have been built here than in any other city.",
    "Cessna, Beechcraft, Stearman and Learjet all got their start in Wichita.",
    "In 1929 Wichita had more than a dozen aircraft manufacturers and several airfields.",
    "Clyde Cessna flew the first Wichita-built airplane in 1917.",
    "Boeing's Wichita plant turned out four B-29 bombers a day at its wartime peak.",
    "The Keeper of the Plains sculpture was created by Comanche-Kiowa artist Blackbear Bosin.",
    "McConnell Air Force Base is home to one of the largest aerial-refueling fleets in the Air Force.",
    "Wichita State's NIAR runs one of the few full-scale aircraft crash-test facilities at a university.",
];

/// Tiny xorshift generator for cosmetic picks. Not for anything that matters.
#[derive(Clone, Debug)]
pub struct FactPicker {
    rng_state: u32,
}

impl FactPicker {
    pub fn new(seed: u32) -> Self {
        // xorshift is stuck at zero
        Self {
            rng_state: if seed == 0 { 0x9E37_79B9 } else { seed },
        }
    }

    fn next_random(&mut self) -> u32 {
        let mut x = self.rng_state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.rng_state = x;
        x
    }

    pub fn pick(&mut self) -> &'static str {
        let idx = self.next_random() as usize % WICHITA_FACTS.len();
        WICHITA_FACTS[idx]
    }
}

/// Seed from the browser's `Math.random()`.
#[cfg(target_arch = "wasm32")]
pub fn browser_seed() -> u32 {
    (js_sys::Math::random() * u32::MAX as f64) as u32
}

/// Fixed seed off the browser so native test runs repeat.
#[cfg(not(target_arch = "wasm32"))]
pub fn browser_seed() -> u32 {
    42
}
