//! Gamified learning paths: static path/badge definitions plus pure
//! progress functions over a caller-supplied completed-module id set.

use serde::Serialize;

// ═══════════════════════════════════════════
// Types
// ═══════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct PathModule {
    pub id: &'static str,
    pub name: &'static str,
    pub kind: &'static str,
    pub points: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct PathBadge {
    pub name: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct LearningPath {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub difficulty: &'static str,
    pub estimated_time: &'static str,
    pub prerequisites: &'static [&'static str],
    pub badge: PathBadge,
    pub modules: &'static [PathModule],
}

/// Standalone achievement badge, earned outside any single path.
#[derive(Debug, Clone, Serialize)]
pub struct AchievementBadge {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
}

/// One path with caller-specific progress attached.
#[derive(Debug, Clone, Serialize)]
pub struct PathStatus {
    #[serde(flatten)]
    pub path: &'static LearningPath,
    pub progress: f64,
    pub unlocked: bool,
    pub earned_points: u32,
    pub total_points: u32,
}

// ═══════════════════════════════════════════
// Tables
// ═══════════════════════════════════════════

pub const PATHS: &[LearningPath] = &[
    LearningPath {
        id: "airway-mastery",
        name: "Airway Mastery",
        description: "Master airway assessment and management techniques for all age groups",
        difficulty: "intermediate",
        estimated_time: "2-3 hours",
        prerequisites: &["basic-assessment"],
        badge: PathBadge {
            name: "Airway Expert",
            icon: "🫁",
            color: "#3B82F6",
        },
        modules: &[
            PathModule {
                id: "respiratory-anatomy",
                name: "Respiratory System Anatomy",
                kind: "anatomy",
                points: 100,
            },
            PathModule {
                id: "airway-reference",
                name: "Airway Management Reference",
                kind: "reference",
                points: 75,
            },
            PathModule {
                id: "pediatric-airway",
                name: "Pediatric Respiratory Distress",
                kind: "scenario",
                points: 150,
            },
            PathModule {
                id: "asthma-simulation",
                name: "Asthma Exacerbation Simulation",
                kind: "simulation",
                points: 200,
            },
        ],
    },
    LearningPath {
        id: "cardiac-expert",
        name: "Cardiac Emergency Expert",
        description: "Comprehensive training in cardiac emergency recognition and treatment",
        difficulty: "advanced",
        estimated_time: "3-4 hours",
        prerequisites: &["basic-assessment", "airway-mastery"],
        badge: PathBadge {
            name: "Cardiac Expert",
            icon: "❤️",
            color: "#EF4444",
        },
        modules: &[
            PathModule {
                id: "cardiac-anatomy",
                name: "Cardiovascular System",
                kind: "anatomy",
                points: 100,
            },
            PathModule {
                id: "adult-cpr-reference",
                name: "Adult CPR Reference",
                kind: "reference",
                points: 75,
            },
            PathModule {
                id: "cardiac-arrest-scenario",
                name: "Adult Cardiac Arrest",
                kind: "scenario",
                points: 200,
            },
            PathModule {
                id: "chest-pain-simulation",
                name: "Chest Pain Assessment",
                kind: "simulation",
                points: 200,
            },
        ],
    },
    LearningPath {
        id: "trauma-specialist",
        name: "Trauma Specialist",
        description: "Advanced trauma assessment and management for multiple injury patients",
        difficulty: "advanced",
        estimated_time: "4-5 hours",
        prerequisites: &["basic-assessment", "airway-mastery"],
        badge: PathBadge {
            name: "Trauma Specialist",
            icon: "🩹",
            color: "#F59E0B",
        },
        modules: &[
            PathModule {
                id: "musculoskeletal-anatomy",
                name: "Musculoskeletal System",
                kind: "anatomy",
                points: 100,
            },
            PathModule {
                id: "trauma-assessment-scenario",
                name: "Trauma Assessment",
                kind: "scenario",
                points: 200,
            },
            PathModule {
                id: "multi-trauma-simulation",
                name: "Multi-System Trauma",
                kind: "simulation",
                points: 250,
            },
        ],
    },
    LearningPath {
        id: "pediatric-specialist",
        name: "Pediatric Specialist",
        description: "Specialized training for pediatric emergency care and assessment",
        difficulty: "intermediate",
        estimated_time: "3-4 hours",
        prerequisites: &["basic-assessment"],
        badge: PathBadge {
            name: "Pediatric Specialist",
            icon: "👶",
            color: "#8B5CF6",
        },
        modules: &[
            PathModule {
                id: "pediatric-cpr-reference",
                name: "Pediatric CPR Reference",
                kind: "reference",
                points: 75,
            },
            PathModule {
                id: "pediatric-respiratory-scenario",
                name: "Pediatric Respiratory Distress",
                kind: "scenario",
                points: 150,
            },
            PathModule {
                id: "febrile-seizure-simulation",
                name: "Pediatric Febrile Seizure",
                kind: "simulation",
                points: 200,
            },
        ],
    },
    LearningPath {
        id: "basic-assessment",
        name: "Basic Assessment",
        description: "Foundation skills for patient assessment and basic life support",
        difficulty: "beginner",
        estimated_time: "1-2 hours",
        prerequisites: &[],
        badge: PathBadge {
            name: "Assessment Foundation",
            icon: "📋",
            color: "#10B981",
        },
        modules: &[
            PathModule {
                id: "first-aid-reference",
                name: "First Aid Reference Guide",
                kind: "reference",
                points: 50,
            },
            PathModule {
                id: "basic-scenarios",
                name: "Basic Emergency Scenarios",
                kind: "scenario",
                points: 100,
            },
        ],
    },
];

pub const BADGES: &[AchievementBadge] = &[
    AchievementBadge {
        id: "first-scenario",
        name: "First Scenario",
        description: "Complete your first interactive scenario",
        icon: "🎯",
        color: "#3B82F6",
    },
    AchievementBadge {
        id: "simulation-master",
        name: "Simulation Master",
        description: "Complete 5 patient simulations with 80% or higher",
        icon: "🏆",
        color: "#F59E0B",
    },
    AchievementBadge {
        id: "anatomy-explorer",
        name: "Anatomy Explorer",
        description: "Complete all anatomy system quizzes",
        icon: "🧠",
        color: "#8B5CF6",
    },
    AchievementBadge {
        id: "quick-thinker",
        name: "Quick Thinker",
        description: "Complete 3 scenarios in under 2 minutes each",
        icon: "⚡",
        color: "#EF4444",
    },
    AchievementBadge {
        id: "perfect-score",
        name: "Perfect Score",
        description: "Achieve 100% on any learning module",
        icon: "🌟",
        color: "#10B981",
    },
];

// ═══════════════════════════════════════════
// Progress functions
// ═══════════════════════════════════════════

fn is_completed(module: &PathModule, completed: &[String]) -> bool {
    completed.iter().any(|id| id == module.id)
}

/// Percent of a path's modules completed, 0..=100.
pub fn path_progress(path: &LearningPath, completed: &[String]) -> f64 {
    let done = path
        .modules
        .iter()
        .filter(|module| is_completed(module, completed))
        .count();
    done as f64 / path.modules.len() as f64 * 100.0
}

pub fn total_points(path: &LearningPath) -> u32 {
    path.modules.iter().map(|module| module.points).sum()
}

pub fn earned_points(path: &LearningPath, completed: &[String]) -> u32 {
    path.modules
        .iter()
        .filter(|module| is_completed(module, completed))
        .map(|module| module.points)
        .sum()
}

/// A path unlocks once every prerequisite path is fully completed.
pub fn is_path_unlocked(path: &LearningPath, completed: &[String]) -> bool {
    path.prerequisites.iter().all(|prereq_id| {
        PATHS
            .iter()
            .find(|candidate| candidate.id == *prereq_id)
            .is_some_and(|prereq| {
                prereq
                    .modules
                    .iter()
                    .all(|module| is_completed(module, completed))
            })
    })
}

/// Status of every path for one completed-module set, table order.
pub fn progress_report(completed: &[String]) -> Vec<PathStatus> {
    PATHS
        .iter()
        .map(|path| PathStatus {
            path,
            progress: path_progress(path, completed),
            unlocked: is_path_unlocked(path, completed),
            earned_points: earned_points(path, completed),
            total_points: total_points(path),
        })
        .collect()
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════
