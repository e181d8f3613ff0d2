//! Static skill catalog
//!
//! Two independent trees: the main tree (spent with skill points, gated on
//! level) and the infamy tree (spent with infamy points, gated on infamy
//! level). Definitions are static data; per-user state is just the set of
//! unlocked ids on the profile.

use serde::{Deserialize, Serialize};

/// Unique identifier for each skill, across both trees.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SkillId {
    // Main tree: focus branch
    FocusedMind,
    DeepWork,
    FlowState,
    // Main tree: hustle branch
    SideHustle,
    Negotiator,
    GoldenTouch,
    // Main tree: feature gates
    WindowShopper,
    Haggler,
    Entrepreneur,
    Tycoon,
    Challenger,
    // Main tree: cross-branch capstone
    Scholar,
    // Infamy tree
    InfamousAura,
    DirtyMoney,
    Syndicate,
    Legend,
}

impl SkillId {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FocusedMind => "focused_mind",
            Self::DeepWork => "deep_work",
            Self::FlowState => "flow_state",
            Self::SideHustle => "side_hustle",
            Self::Negotiator => "negotiator",
            Self::GoldenTouch => "golden_touch",
            Self::WindowShopper => "window_shopper",
            Self::Haggler => "haggler",
            Self::Entrepreneur => "entrepreneur",
            Self::Tycoon => "tycoon",
            Self::Challenger => "challenger",
            Self::Scholar => "scholar",
            Self::InfamousAura => "infamous_aura",
            Self::DirtyMoney => "dirty_money",
            Self::Syndicate => "syndicate",
            Self::Legend => "legend",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        SKILLS.iter().map(|sk| sk.id).find(|id| id.as_str() == s)
    }
}

/// Which tree a skill belongs to (determines the currency and level gate).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tree {
    Main,
    Infamy,
}

/// Feature pages gated behind skills. A feature is visible iff some
/// unlocked skill declares it, or it is always visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKey {
    Timer,
    Skills,
    Shop,
    Businesses,
    Bonds,
    Challenges,
}

impl FeatureKey {
    /// Features that need no skill to be visible.
    pub fn always_visible(&self) -> bool {
        matches!(self, Self::Timer | Self::Skills)
    }
}

/// Passive bonus granted by a skill.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Boost {
    /// Additive XP multiplier bonus (0.10 = +10%).
    Xp(f64),
    /// Additive cash multiplier bonus.
    Cash(f64),
    /// Fractional discount on shop prices (0.10 = 10% off).
    ShopDiscount(f64),
}

/// Skill definition with all metadata.
#[derive(Debug, Clone)]
pub struct Skill {
    pub id: SkillId,
    pub name: &'static str,
    pub description: &'static str,
    pub tree: Tree,
    /// Point cost (skill points for main, infamy points for infamy).
    pub cost: u32,
    /// Minimum level (main: profile level, infamy: infamy level).
    pub prerequisite_level: Option<u32>,
    pub prerequisites: &'static [SkillId],
    pub unlocks_feature: Option<FeatureKey>,
    pub boost: Option<Boost>,
}

/// All skill definitions, both trees.
pub static SKILLS: &[Skill] = &[
    // === Main tree: focus branch ===
    Skill {
        id: SkillId::FocusedMind,
        name: "Focused Mind",
        description: "+5% XP from study sessions",
        tree: Tree::Main,
        cost: 1,
        prerequisite_level: None,
        prerequisites: &[],
        unlocks_feature: None,
        boost: Some(Boost::Xp(0.05)),
    },
    Skill {
        id: SkillId::DeepWork,
        name: "Deep Work",
        description: "+10% XP from study sessions",
        tree: Tree::Main,
        cost: 2,
        prerequisite_level: Some(5),
        prerequisites: &[SkillId::FocusedMind],
        unlocks_feature: None,
        boost: Some(Boost::Xp(0.10)),
    },
    Skill {
        id: SkillId::FlowState,
        name: "Flow State",
        description: "+15% XP from study sessions",
        tree: Tree::Main,
        cost: 3,
        prerequisite_level: Some(15),
        prerequisites: &[SkillId::DeepWork],
        unlocks_feature: None,
        boost: Some(Boost::Xp(0.15)),
    },
    // === Main tree: hustle branch ===
    Skill {
        id: SkillId::SideHustle,
        name: "Side Hustle",
        description: "+5% cash from study sessions",
        tree: Tree::Main,
        cost: 1,
        prerequisite_level: None,
        prerequisites: &[],
        unlocks_feature: None,
        boost: Some(Boost::Cash(0.05)),
    },
    Skill {
        id: SkillId::Negotiator,
        name: "Negotiator",
        description: "+10% cash from study sessions",
        tree: Tree::Main,
        cost: 2,
        prerequisite_level: Some(5),
        prerequisites: &[SkillId::SideHustle],
        unlocks_feature: None,
        boost: Some(Boost::Cash(0.10)),
    },
    Skill {
        id: SkillId::GoldenTouch,
        name: "Golden Touch",
        description: "+15% cash from study sessions",
        tree: Tree::Main,
        cost: 4,
        prerequisite_level: Some(25),
        prerequisites: &[SkillId::Negotiator],
        unlocks_feature: None,
        boost: Some(Boost::Cash(0.15)),
    },
    // === Main tree: feature gates ===
    Skill {
        id: SkillId::WindowShopper,
        name: "Window Shopper",
        description: "Opens the shop",
        tree: Tree::Main,
        cost: 1,
        prerequisite_level: Some(2),
        prerequisites: &[],
        unlocks_feature: Some(FeatureKey::Shop),
        boost: None,
    },
    Skill {
        id: SkillId::Haggler,
        name: "Haggler",
        description: "10% off all shop prices",
        tree: Tree::Main,
        cost: 2,
        prerequisite_level: Some(8),
        prerequisites: &[SkillId::WindowShopper],
        unlocks_feature: None,
        boost: Some(Boost::ShopDiscount(0.10)),
    },
    Skill {
        id: SkillId::Entrepreneur,
        name: "Entrepreneur",
        description: "Opens the businesses page",
        tree: Tree::Main,
        cost: 2,
        prerequisite_level: Some(3),
        prerequisites: &[],
        unlocks_feature: Some(FeatureKey::Businesses),
        boost: None,
    },
    Skill {
        id: SkillId::Tycoon,
        name: "Tycoon",
        description: "Opens the bond market",
        tree: Tree::Main,
        cost: 3,
        prerequisite_level: Some(10),
        prerequisites: &[SkillId::Entrepreneur],
        unlocks_feature: Some(FeatureKey::Bonds),
        boost: None,
    },
    Skill {
        id: SkillId::Challenger,
        name: "Challenger",
        description: "Opens daily challenges and offers",
        tree: Tree::Main,
        cost: 1,
        prerequisite_level: Some(2),
        prerequisites: &[],
        unlocks_feature: Some(FeatureKey::Challenges),
        boost: None,
    },
    // === Main tree: capstone ===
    Skill {
        id: SkillId::Scholar,
        name: "Scholar",
        description: "+10% XP, earned the hard way",
        tree: Tree::Main,
        cost: 3,
        prerequisite_level: Some(20),
        prerequisites: &[SkillId::DeepWork, SkillId::Negotiator],
        unlocks_feature: None,
        boost: Some(Boost::Xp(0.10)),
    },
    // === Infamy tree ===
    Skill {
        id: SkillId::InfamousAura,
        name: "Infamous Aura",
        description: "+10% XP, permanently",
        tree: Tree::Infamy,
        cost: 1,
        prerequisite_level: Some(1),
        prerequisites: &[],
        unlocks_feature: None,
        boost: Some(Boost::Xp(0.10)),
    },
    Skill {
        id: SkillId::DirtyMoney,
        name: "Dirty Money",
        description: "+10% cash, permanently",
        tree: Tree::Infamy,
        cost: 1,
        prerequisite_level: Some(1),
        prerequisites: &[],
        unlocks_feature: None,
        boost: Some(Boost::Cash(0.10)),
    },
    Skill {
        id: SkillId::Syndicate,
        name: "Syndicate",
        description: "15% off all shop prices",
        tree: Tree::Infamy,
        cost: 2,
        prerequisite_level: Some(2),
        prerequisites: &[SkillId::DirtyMoney],
        unlocks_feature: None,
        boost: Some(Boost::ShopDiscount(0.15)),
    },
    Skill {
        id: SkillId::Legend,
        name: "Legend",
        description: "+20% XP, permanently",
        tree: Tree::Infamy,
        cost: 3,
        prerequisite_level: Some(3),
        prerequisites: &[SkillId::InfamousAura],
        unlocks_feature: None,
        boost: Some(Boost::Xp(0.20)),
    },
];

impl Skill {
    /// Get a skill definition by id.
    pub fn get(id: SkillId) -> &'static Skill {
        SKILLS
            .iter()
            .find(|s| s.id == id)
            .expect("all skill ids are defined in the catalog")
    }

    /// All skills in one tree, catalog order.
    pub fn in_tree(tree: Tree) -> impl Iterator<Item = &'static Skill> {
        SKILLS.iter().filter(move |s| s.tree == tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_ids_resolve() {
        for skill in SKILLS {
            assert_eq!(Skill::get(skill.id).id, skill.id);
            assert_eq!(SkillId::from_str(skill.id.as_str()), Some(skill.id));
        }
    }

    #[test]
    fn test_prerequisites_stay_in_tree() {
        for skill in SKILLS {
            for prereq in skill.prerequisites {
                assert_eq!(
                    Skill::get(*prereq).tree,
                    skill.tree,
                    "{} depends on a skill from the other tree",
                    skill.name
                );
            }
        }
    }

    #[test]
    fn test_prerequisites_acyclic() {
        // Every prerequisite appears earlier in the catalog, so the catalog
        // order is a valid topological order.
        for (i, skill) in SKILLS.iter().enumerate() {
            for prereq in skill.prerequisites {
                let pos = SKILLS.iter().position(|s| s.id == *prereq).unwrap();
                assert!(pos < i, "{} listed before its prerequisite", skill.name);
            }
        }
    }
}
