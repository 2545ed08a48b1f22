/// Caption phase of the landing sequence.
///
/// Steps only move forward through [`SequenceStep::next`]; `Join` is terminal.
#[derive(Debug, Default, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub enum SequenceStep {
    #[default]
    Intro,     // Image entrance, no caption
    Strength,  // "Strength Through / Every Break"
    Precision, // "Precision Engineered / For the Perfect Form"
    Join,      // "Join The Fitness Club", stays forever
}

impl SequenceStep {
    #[cfg(test)]
    pub const ALL: [SequenceStep; 4] = [
        SequenceStep::Intro,
        SequenceStep::Strength,
        SequenceStep::Precision,
        SequenceStep::Join,
    ];

    pub fn next(self) -> Option<SequenceStep> {
        match self {
            SequenceStep::Intro => Some(SequenceStep::Strength),
            SequenceStep::Strength => Some(SequenceStep::Precision),
            SequenceStep::Precision => Some(SequenceStep::Join),
            SequenceStep::Join => None,
        }
    }

    pub fn index(self) -> u8 {
        match self {
            SequenceStep::Intro => 0,
            SequenceStep::Strength => 1,
            SequenceStep::Precision => 2,
            SequenceStep::Join => 3,
        }
    }

    pub fn is_terminal(self) -> bool {
        self.next().is_none()
    }
}
