//! Template bank: reply fragments keyed by emotion and conversational role.
//!
//! Not every emotion defines every role, so lookups go through
//! [`TemplateBank::first_available`] with an explicit preference order
//! instead of assuming a role exists.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::emotion::EmotionLabel;

/// What a fragment does in the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseRole {
    Acknowledgment,
    Validation,
    Calming,
    Encouragement,
    Celebration,
    Reassurance,
    Support,
    Grounding,
    Empathy,
    Comfort,
    Hope,
    Excitement,
    Curiosity,
    Understanding,
    Engagement,
}

impl fmt::Display for ResponseRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Acknowledgment => "acknowledgment",
            Self::Validation => "validation",
            Self::Calming => "calming",
            Self::Encouragement => "encouragement",
            Self::Celebration => "celebration",
            Self::Reassurance => "reassurance",
            Self::Support => "support",
            Self::Grounding => "grounding",
            Self::Empathy => "empathy",
            Self::Comfort => "comfort",
            Self::Hope => "hope",
            Self::Excitement => "excitement",
            Self::Curiosity => "curiosity",
            Self::Understanding => "understanding",
            Self::Engagement => "engagement",
        };
        f.write_str(name)
    }
}

type RoleTable = &'static [(ResponseRole, &'static [&'static str])];

const JOY_ROLES: RoleTable = &[
    (
        ResponseRole::Acknowledgment,
        &[
            "I can feel your happiness radiating through your words! 😊",
            "Your joy is absolutely contagious! That's wonderful! ✨",
            "I love seeing you so happy and excited! 🌟",
            "Your positive energy is amazing! Keep that smile going! 😄",
            "That's fantastic! Your enthusiasm really brightens my day! 🌈",
        ],
    ),
    (
        ResponseRole::Encouragement,
        &[
            "This is such great news! Tell me more about what's making you so happy!",
            "I'm so glad things are going well for you! What's the best part?",
            "Your happiness is inspiring! How can we keep this positive momentum going?",
            "Wonderful! Moments like these are what life is all about!",
            "I'm thrilled for you! What are you most looking forward to next?",
        ],
    ),
    (
        ResponseRole::Celebration,
        &[
            "Let's celebrate this moment together! 🎉",
            "You deserve all this happiness! Enjoy every second of it! 🎊",
            "This calls for a virtual high-five! ✋",
            "I'm doing a happy dance over here! 💃",
            "Time to party! Your joy is the best kind of energy! 🎈",
        ],
    ),
];

const ANGER_ROLES: RoleTable = &[
    (
        ResponseRole::Acknowledgment,
        &[
            "I can sense you're really frustrated right now, and that's completely understandable.",
            "Your anger is valid - it sounds like you're dealing with something really challenging.",
            "I hear you, and I can tell this situation is really getting to you.",
            "It's clear you're upset, and you have every right to feel that way.",
            "I understand you're angry - sometimes things just push us to our limit.",
        ],
    ),
    (
        ResponseRole::Validation,
        &[
            "It's okay to feel angry when things aren't fair or going right.",
            "Your feelings are completely justified - anyone would be upset in your situation.",
            "Anger can actually show us what we care deeply about.",
            "It's natural to feel this way when you're facing such challenges.",
            "You're not wrong to feel angry - this sounds really difficult.",
        ],
    ),
    (
        ResponseRole::Calming,
        &[
            "Take a deep breath with me. Let's work through this together.",
            "What would help you feel a bit calmer right now?",
            "Sometimes talking through our anger can help us find a path forward.",
            "I'm here to listen without judgment. What's weighing on you most?",
            "Let's focus on what's within your control. What small step could help?",
        ],
    ),
];

const FEAR_ROLES: RoleTable = &[
    (
        ResponseRole::Reassurance,
        &[
            "I can tell you're feeling scared or anxious, and I want you to know you're not alone.",
            "Fear can be overwhelming, but you're stronger than you realize.",
            "It's brave of you to share these feelings with me. You're safe here.",
            "I'm here with you through this. We can face this worry together.",
            "Your fear is understandable - many people would feel the same way.",
        ],
    ),
    (
        ResponseRole::Support,
        &[
            "What would help you feel a little safer or more secure right now?",
            "Sometimes naming our fears helps reduce their power over us.",
            "You've overcome challenges before - what helped you then?",
            "Let's break this down into smaller, more manageable pieces.",
            "I believe in your ability to handle whatever you're facing.",
        ],
    ),
    (
        ResponseRole::Grounding,
        &[
            "Let's focus on the present moment. What are three things you can see around you?",
            "Take a moment to feel your feet on the ground. You're here, you're safe.",
            "Breathe with me - in for 4, hold for 4, out for 4.",
            "What's one small thing that always makes you feel a bit better?",
            "Remember, this feeling will pass. You don't have to carry it forever.",
        ],
    ),
];

const SADNESS_ROLES: RoleTable = &[
    (
        ResponseRole::Empathy,
        &[
            "I can feel the sadness in your words, and I'm so sorry you're going through this.",
            "It sounds like you're carrying a heavy heart right now. I'm here for you.",
            "Your sadness is valid and important. Thank you for sharing it with me.",
            "I wish I could give you a comforting hug right now. Please know I care.",
            "It takes courage to express sadness. I'm honored you trust me with these feelings.",
        ],
    ),
    (
        ResponseRole::Comfort,
        &[
            "It's okay to feel sad - it shows how much you care and how deeply you feel.",
            "Sadness is a natural response to loss and disappointment. Be gentle with yourself.",
            "You don't have to be strong all the time. It's okay to let yourself feel this.",
            "Even in sadness, you're not alone. I'm here to sit with you in this feeling.",
            "This pain you're feeling is real, and it matters. Your feelings matter.",
        ],
    ),
    (
        ResponseRole::Hope,
        &[
            "While I can't take away your pain, I believe brighter days are ahead for you.",
            "You have so much strength, even when you don't feel it. This won't last forever.",
            "Small steps count. What's one tiny thing that might bring a moment of peace?",
            "Your heart is capable of healing, even if it doesn't feel that way now.",
            "You matter more than you know, especially on days when it's hard to believe.",
        ],
    ),
];

const SURPRISE_ROLES: RoleTable = &[
    (
        ResponseRole::Excitement,
        &[
            "Wow, that sounds unexpected! I'm curious to hear more!",
            "What a surprise! Life certainly has interesting ways of keeping us on our toes!",
            "That's amazing! I love when life throws us pleasant surprises!",
            "How exciting! Unexpected moments can be the most memorable ones!",
            "That caught me off guard too! What was your first reaction?",
        ],
    ),
    (
        ResponseRole::Curiosity,
        &[
            "I'm so intrigued! Tell me everything - how did that happen?",
            "What an interesting turn of events! How are you processing all of this?",
            "That's fascinating! What surprised you the most about the whole situation?",
            "I'm on the edge of my seat! What happened next?",
            "That's incredible! How did you handle such an unexpected moment?",
        ],
    ),
];

const DISGUST_ROLES: RoleTable = &[
    (
        ResponseRole::Understanding,
        &[
            "I can tell something really bothered or disgusted you - that must have been unpleasant.",
            "It sounds like you encountered something that really didn't sit well with you.",
            "That sounds genuinely awful - I completely understand your reaction.",
            "I can hear the disgust in your words, and I don't blame you one bit.",
            "Some things are just genuinely hard to stomach - your reaction is totally normal.",
        ],
    ),
    (
        ResponseRole::Support,
        &[
            "I'm sorry you had to experience something so off-putting.",
            "It's okay to feel disgusted when something violates your values or comfort.",
            "You have every right to feel repulsed by things that go against your standards.",
            "Sometimes we encounter things that just feel wrong - trust your instincts.",
            "That sounds really unpleasant. How can we help you feel better about it?",
        ],
    ),
];

const NEUTRAL_ROLES: RoleTable = &[
    (
        ResponseRole::Engagement,
        &[
            "I'm here and ready to chat! What's on your mind today?",
            "Thank you for sharing that with me. I'm listening!",
            "That's interesting. Tell me more about what you're thinking.",
            "I appreciate you taking the time to talk with me. How can I help?",
            "I'm glad you're here! What would you like to explore together?",
        ],
    ),
    (
        ResponseRole::Curiosity,
        &[
            "What brings you here today? I'm curious to learn more about you!",
            "That's a thoughtful perspective. What's been on your mind lately?",
            "I'd love to hear more about what matters to you right now.",
            "Thanks for sharing! What else would you like to talk about?",
            "I'm interested in your thoughts. What's something you've been pondering?",
        ],
    ),
];

const FOLLOW_UPS: &[(EmotionLabel, &[&str])] = &[
    (
        EmotionLabel::Joy,
        &[
            "What's been the highlight of your day?",
            "Who else have you shared this good news with?",
            "What are you most grateful for right now?",
            "How long have you been feeling this happy?",
            "What do you think contributed most to this positive feeling?",
        ],
    ),
    (
        EmotionLabel::Anger,
        &[
            "What do you think would help resolve this situation?",
            "Have you been able to talk to anyone else about this?",
            "What's the most frustrating part of all this?",
            "Is this something new or has it been building up?",
            "What would need to change for you to feel better about this?",
        ],
    ),
    (
        EmotionLabel::Fear,
        &[
            "What's the worst part about this worry for you?",
            "Have you felt this way before? What helped then?",
            "Is there someone who makes you feel safer when you're scared?",
            "What would you tell a friend who was feeling the same way?",
            "What's one small step you could take to feel a bit more in control?",
        ],
    ),
    (
        EmotionLabel::Sadness,
        &[
            "How long have you been feeling this way?",
            "Is there anything that usually helps when you're sad?",
            "Do you feel comfortable talking about what's making you sad?",
            "What's something small that might bring you a moment of comfort?",
            "Have you been able to take care of yourself during this difficult time?",
        ],
    ),
    (
        EmotionLabel::Surprise,
        &[
            "How did you react when this first happened?",
            "Is this a good surprise or a challenging one?",
            "What do you think will happen next?",
            "How has this changed your perspective on things?",
            "What's the most surprising part of all this?",
        ],
    ),
    (
        EmotionLabel::Disgust,
        &[
            "What made this particularly hard to deal with?",
            "Is this something you encounter often?",
            "How do you usually handle situations like this?",
            "What would help you feel better after experiencing something so unpleasant?",
            "Is there a way to avoid similar situations in the future?",
        ],
    ),
    (
        EmotionLabel::Neutral,
        &[
            "What's something interesting that happened to you recently?",
            "How has your day been going so far?",
            "Is there anything particular you'd like to talk about?",
            "What's been occupying your thoughts lately?",
            "What would make today feel like a good day for you?",
        ],
    ),
];

const TRANSITIONS: &[&str] = &[
    "By the way,",
    "Also,",
    "I'm curious,",
    "Tell me,",
    "What do you think about",
    "I wonder",
    "Speaking of which,",
];

const EMPATHY_ADDITIONS: &[&str] = &[
    "I really hear you on this.",
    "This sounds genuinely difficult.",
    "I can only imagine how tough this must be.",
    "Your feelings make complete sense.",
];

/// Topic keywords and the clause appended when a message mentions one.
/// Checked in order; only the first matching topic contributes.
pub const PERSONAL_TOPICS: &[(&[&str], &str)] = &[
    (
        &["work", "job", "boss", "colleague"],
        "Work situations can be especially challenging to navigate.",
    ),
    (
        &["family", "parent", "mom", "dad", "sister", "brother"],
        "Family relationships can bring up such complex emotions.",
    ),
    (
        &["relationship", "partner", "boyfriend", "girlfriend", "spouse"],
        "Relationships require so much emotional energy and care.",
    ),
    (
        &["school", "study", "exam", "test", "grade"],
        "Academic pressure can really weigh on us.",
    ),
    (
        &["health", "sick", "doctor", "hospital"],
        "Health concerns can be so worrying and overwhelming.",
    ),
];

fn role_table(label: EmotionLabel) -> RoleTable {
    match label {
        EmotionLabel::Joy => JOY_ROLES,
        EmotionLabel::Anger => ANGER_ROLES,
        EmotionLabel::Fear => FEAR_ROLES,
        EmotionLabel::Sadness => SADNESS_ROLES,
        EmotionLabel::Surprise => SURPRISE_ROLES,
        EmotionLabel::Disgust => DISGUST_ROLES,
        EmotionLabel::Neutral => NEUTRAL_ROLES,
    }
}

fn owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// Reply fragments, follow-up questions, transitions and empathy lines.
///
/// Built once and read-only afterwards; the mutators exist for assembling
/// custom banks before handing one to a composer.
#[derive(Debug, Clone)]
pub struct TemplateBank {
    responses: HashMap<EmotionLabel, HashMap<ResponseRole, Vec<String>>>,
    follow_ups: HashMap<EmotionLabel, Vec<String>>,
    transitions: Vec<String>,
    empathy_additions: Vec<String>,
}

impl Default for TemplateBank {
    fn default() -> Self {
        let responses = EmotionLabel::ALL
            .iter()
            .map(|&label| {
                let roles = role_table(label)
                    .iter()
                    .map(|(role, list)| (*role, owned(list)))
                    .collect();
                (label, roles)
            })
            .collect();

        Self {
            responses,
            follow_ups: FOLLOW_UPS.iter().map(|(l, list)| (*l, owned(list))).collect(),
            transitions: owned(TRANSITIONS),
            empathy_additions: owned(EMPATHY_ADDITIONS),
        }
    }
}

impl TemplateBank {
    /// A bank with no entries at all.
    pub fn empty() -> Self {
        Self {
            responses: HashMap::new(),
            follow_ups: HashMap::new(),
            transitions: Vec::new(),
            empathy_additions: Vec::new(),
        }
    }

    /// Templates for one role, if this emotion defines it.
    pub fn role(&self, label: EmotionLabel, role: ResponseRole) -> Option<&[String]> {
        self.responses
            .get(&label)
            .and_then(|roles| roles.get(&role))
            .map(Vec::as_slice)
    }

    /// The first role in `preference` that this emotion defines.
    pub fn first_available(
        &self,
        label: EmotionLabel,
        preference: &[ResponseRole],
    ) -> Option<(ResponseRole, &[String])> {
        preference
            .iter()
            .find_map(|&role| self.role(label, role).map(|list| (role, list)))
    }

    /// Follow-up questions for `label`, or the neutral ones when it has none.
    pub fn follow_ups(&self, label: EmotionLabel) -> &[String] {
        self.follow_ups
            .get(&label)
            .or_else(|| self.follow_ups.get(&EmotionLabel::Neutral))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn transitions(&self) -> &[String] {
        &self.transitions
    }

    pub fn empathy_additions(&self) -> &[String] {
        &self.empathy_additions
    }

    pub fn insert_role(&mut self, label: EmotionLabel, role: ResponseRole, templates: Vec<String>) {
        self.responses.entry(label).or_default().insert(role, templates);
    }

    pub fn remove_role(&mut self, label: EmotionLabel, role: ResponseRole) {
        if let Some(roles) = self.responses.get_mut(&label) {
            roles.remove(&role);
        }
    }

    pub fn set_follow_ups(&mut self, label: EmotionLabel, questions: Vec<String>) {
        self.follow_ups.insert(label, questions);
    }

    pub fn remove_follow_ups(&mut self, label: EmotionLabel) {
        self.follow_ups.remove(&label);
    }

    pub fn set_transitions(&mut self, transitions: Vec<String>) {
        self.transitions = transitions;
    }

    pub fn set_empathy_additions(&mut self, additions: Vec<String>) {
        self.empathy_additions = additions;
    }
}
