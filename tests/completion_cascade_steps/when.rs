//! When steps for completion cascade BDD scenarios.

use super::world::{CascadeWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;

#[when("the parent task is completed")]
fn parent_task_completed(world: &mut CascadeWorld) -> Result<(), eyre::Report> {
    let parent = world
        .parent
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing parent task in scenario world"))?;

    run_async(world.completion.complete_parent_task(parent.id()))
        .wrap_err("complete parent task")?;
    Ok(())
}

/// Completes the named child and records the parent's stamp once it closes.
fn complete_named_child(world: &mut CascadeWorld, name: &str) -> Result<(), eyre::Report> {
    let child_id = world
        .children
        .get(name)
        .copied()
        .ok_or_else(|| eyre::eyre!("unknown child task {name} in scenario world"))?;
    let parent = world
        .parent
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing parent task in scenario world"))?;
    let parent_id = parent.id();

    run_async(world.completion.complete_child_task(child_id))
        .wrap_err("complete child task")?;

    if world.recorded_parent_stamp.is_none() {
        let closed = run_async(world.tasks.get_task(parent_id))
            .wrap_err("fetch parent after child completion")?
            .ok_or_else(|| eyre::eyre!("parent task disappeared"))?;
        world.recorded_parent_stamp = closed.completed_date();
    }
    Ok(())
}

#[when(r#"the child task "{name}" is completed"#)]
fn child_task_completed(world: &mut CascadeWorld, name: String) -> Result<(), eyre::Report> {
    complete_named_child(world, &name)
}

#[when(r#"the child task "{name}" is completed again"#)]
fn child_task_completed_again(
    world: &mut CascadeWorld,
    name: String,
) -> Result<(), eyre::Report> {
    complete_named_child(world, &name)
}
