//! Then steps for completion cascade BDD scenarios.

use super::world::{CascadeWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::then;

#[then("the parent task is completed")]
fn parent_task_is_completed(world: &CascadeWorld) -> Result<(), eyre::Report> {
    let parent = world
        .parent
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing parent task in scenario world"))?;
    let fetched = run_async(world.tasks.get_task(parent.id()))
        .wrap_err("fetch parent task")?
        .ok_or_else(|| eyre::eyre!("parent task disappeared"))?;

    if !fetched.is_completed() {
        return Err(eyre::eyre!("expected the parent task to be completed"));
    }
    Ok(())
}

#[then("the parent task is still open")]
fn parent_task_is_still_open(world: &CascadeWorld) -> Result<(), eyre::Report> {
    let parent = world
        .parent
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing parent task in scenario world"))?;
    let fetched = run_async(world.tasks.get_task(parent.id()))
        .wrap_err("fetch parent task")?
        .ok_or_else(|| eyre::eyre!("parent task disappeared"))?;

    if fetched.is_completed() {
        return Err(eyre::eyre!("expected the parent task to still be open"));
    }
    Ok(())
}

#[then("every child task carries the parent's completion stamp")]
fn children_share_parent_stamp(world: &CascadeWorld) -> Result<(), eyre::Report> {
    let parent = world
        .parent
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing parent task in scenario world"))?;
    let fetched = run_async(world.tasks.get_task(parent.id()))
        .wrap_err("fetch parent task")?
        .ok_or_else(|| eyre::eyre!("parent task disappeared"))?;
    let parent_stamp = fetched
        .completed_date()
        .ok_or_else(|| eyre::eyre!("parent task carries no completion stamp"))?;

    for (name, child_id) in &world.children {
        let child = run_async(world.tasks.get_child_task(*child_id))
            .wrap_err("fetch child task")?
            .ok_or_else(|| eyre::eyre!("child task {name} disappeared"))?;
        if child.completed_date() != Some(parent_stamp) {
            return Err(eyre::eyre!(
                "child task {name} does not share the parent's stamp"
            ));
        }
    }
    Ok(())
}

#[then("the parent task's completion stamp is unchanged")]
fn parent_stamp_is_unchanged(world: &CascadeWorld) -> Result<(), eyre::Report> {
    let recorded = world
        .recorded_parent_stamp
        .ok_or_else(|| eyre::eyre!("no parent stamp recorded in scenario world"))?;
    let parent = world
        .parent
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing parent task in scenario world"))?;
    let fetched = run_async(world.tasks.get_task(parent.id()))
        .wrap_err("fetch parent task")?
        .ok_or_else(|| eyre::eyre!("parent task disappeared"))?;

    if fetched.completed_date() != Some(recorded) {
        return Err(eyre::eyre!("the parent task's completion stamp moved"));
    }
    Ok(())
}
