//! Static dialogue scripts and the display-name pool.
//!
//! Both are content, not logic: the simulation only ever indexes into them.
//! The built-in sets are what ships with the town; hosts may supply their own.

use vt_core::ScriptId;

use crate::{AgentError, AgentResult};

const BUILTIN_SCRIPTS: &[&[&str]] = &[
    &[
        "Nice day for a walk, isn't it?",
        "Perfect. The plaza fountain is running again.",
        "I saw someone fishing by the pier earlier.",
        "Did they catch anything?",
    ],
    &[
        "Have you seen my cat anywhere?",
        "The orange one? It was napping on the bakery roof.",
        "Of course it was. Thanks!",
        "Good luck getting it down.",
    ],
    &[
        "Are you going to the lantern festival?",
        "Wouldn't miss it. I'm building a new lantern.",
        "What shape this year?",
        "A giant voxel duck.",
        "That's ambitious.",
    ],
    &[
        "They're putting up a new tower on the east side.",
        "Another one? We're running out of sky.",
        "At least the view from the top will be great.",
    ],
    &[
        "I finally beat the fishing record!",
        "No way. How big?",
        "Seven blocks long. Took me all morning.",
        "Now I have to try again.",
        "See you at the pier then.",
        "Bring snacks.",
    ],
    &[
        "Is it just me, or are the roads busier lately?",
        "Everyone's heading to the park.",
        "Then that's where I'm going too.",
        "Save me a bench.",
    ],
];

const BUILTIN_NAMES: &[&str] = &[
    "Ada", "Bram", "Cleo", "Dario", "Elin", "Faye", "Gus", "Hana", "Ivo", "Juno",
    "Kai", "Lena", "Milo", "Nia", "Otto", "Pia", "Quinn", "Rosa", "Sami", "Teo",
];

// ── DialogueLibrary ───────────────────────────────────────────────────────────

/// Fixed library of multi-line dialogues, addressed by [`ScriptId`].
#[derive(Clone, Debug)]
pub struct DialogueLibrary {
    scripts: Vec<Vec<String>>,
}

impl DialogueLibrary {
    /// Validate and wrap a host-supplied set of scripts.
    pub fn new(scripts: Vec<Vec<String>>) -> AgentResult<Self> {
        if scripts.is_empty() {
            return Err(AgentError::EmptyLibrary);
        }
        if ScriptId::try_from(scripts.len()).is_err() || scripts.len() == ScriptId::INVALID.index() {
            return Err(AgentError::TooManyScripts(scripts.len()));
        }
        if let Some(i) = scripts.iter().position(Vec::is_empty) {
            return Err(AgentError::EmptyScript(i));
        }
        Ok(Self { scripts })
    }

    /// The dialogues that ship with the town.
    pub fn builtin() -> Self {
        Self {
            scripts: BUILTIN_SCRIPTS
                .iter()
                .map(|s| s.iter().map(|l| (*l).to_owned()).collect())
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.scripts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }

    /// Every valid script id, in library order.
    pub fn ids(&self) -> Vec<ScriptId> {
        (0..self.scripts.len() as u16).map(ScriptId).collect()
    }

    pub fn script(&self, id: ScriptId) -> Option<&[String]> {
        self.scripts.get(id.index()).map(Vec::as_slice)
    }

    /// Number of lines in `id`; 0 for an unknown script.
    pub fn script_len(&self, id: ScriptId) -> usize {
        self.script(id).map_or(0, <[String]>::len)
    }

    pub fn line(&self, id: ScriptId, index: usize) -> Option<&str> {
        self.script(id)?.get(index).map(String::as_str)
    }
}

impl Default for DialogueLibrary {
    fn default() -> Self {
        Self::builtin()
    }
}

// ── NamePool ──────────────────────────────────────────────────────────────────

/// Display names handed out round-robin at spawn.
#[derive(Clone, Debug)]
pub struct NamePool {
    names: Vec<String>,
}

impl NamePool {
    pub fn new(names: Vec<String>) -> AgentResult<Self> {
        if names.is_empty() {
            return Err(AgentError::EmptyNamePool);
        }
        Ok(Self { names })
    }

    pub fn builtin() -> Self {
        Self { names: BUILTIN_NAMES.iter().map(|n| (*n).to_owned()).collect() }
    }

    /// Name for the `n`-th spawned agent.  Once the pool wraps, a generation
    /// number is appended ("Ada 2", "Ada 3", …).
    pub fn name_for(&self, n: usize) -> String {
        let base = &self.names[n % self.names.len()];
        match n / self.names.len() {
            0 => base.clone(),
            round => format!("{base} {}", round + 1),
        }
    }
}

impl Default for NamePool {
    fn default() -> Self {
        Self::builtin()
    }
}
