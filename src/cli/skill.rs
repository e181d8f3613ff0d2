//! Skill commands

use anyhow::{bail, Result};

use grindstone::skills::{SkillId, Tree, SKILLS};

use super::Context;

/// List every skill with its unlock status.
pub fn list_command(ctx: &Context) -> Result<()> {
    let engine = ctx.engine()?;
    let profile = engine.profile();

    println!(
        "Skill points: {}  Infamy points: {}\n",
        profile.skill_points, profile.infamy_points
    );

    for tree in [Tree::Main, Tree::Infamy] {
        if tree == Tree::Infamy && profile.infamy_level == 0 {
            continue;
        }
        println!(
            "{}:",
            match tree {
                Tree::Main => "Main tree",
                Tree::Infamy => "Infamy tree",
            }
        );
        for skill in SKILLS.iter().filter(|s| s.tree == tree) {
            let unlocked = profile.unlocked_skills.contains(&skill.id)
                || profile.unlocked_infamy_skills.contains(&skill.id);
            let marker = if unlocked {
                "x"
            } else if engine.can_unlock_skill(skill.id).is_ok() {
                "+"
            } else {
                " "
            };
            println!(
                "  [{}] {} ({} pt) - {}",
                marker,
                skill.name,
                skill.cost,
                skill.description
            );
            if !unlocked {
                if let Some(level) = skill.prerequisite_level {
                    println!("      requires level {}", level);
                }
                for prereq in skill.prerequisites {
                    println!("      requires {}", prereq.as_str());
                }
            }
        }
        println!();
    }

    ctx.save(&engine)?;
    Ok(())
}

/// Unlock one skill by name.
pub fn unlock_command(ctx: &Context, name: &str) -> Result<()> {
    let Some(id) = SkillId::from_str(name) else {
        bail!("Unknown skill: {}", name);
    };

    let mut engine = ctx.engine()?;
    engine.unlock_skill(id)?;
    println!("Unlocked {}.", name);

    ctx.save(&engine)?;
    Ok(())
}
