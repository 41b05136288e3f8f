//! Onboarding steps shown before the first session of play.

pub struct TutorialStep {
    pub title: &'static str,
    pub description: &'static str,
}

pub const TUTORIAL_STEPS: [TutorialStep; 4] = [
    TutorialStep {
        title: "Welcome to Wichita to the Moon!",
        description: "Use Wichita's aerospace innovation to build a moonbase. \
                      Click the innovation center to generate Innovation Capital (IC).",
    },
    TutorialStep {
        title: "Unlock Upgrades",
        description: "Spend IC to unlock Wichita landmarks and companies. These upgrades \
                      increase your click power and provide passive IC generation.",
    },
    TutorialStep {
        title: "Build the Moonbase",
        description: "Invest IC into the 5 moonbase modules. Complete all modules to win!",
    },
    TutorialStep {
        title: "Ready to Launch!",
        description: "Click to generate IC, unlock upgrades, and build your moonbase. Good luck!",
    },
];

pub fn step(index: usize) -> Option<&'static TutorialStep> {
    TUTORIAL_STEPS.get(index)
}

pub fn is_last(index: usize) -> bool {
    index + 1 >= TUTORIAL_STEPS.len()
}
