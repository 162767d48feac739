use anyhow::{bail, Context, Result};
use std::time::Duration;
use tracing::debug;

use seeker::{format_tree_as_compact_yaml, snapshot, StringMatch, UiTreeNode};

use crate::cli::{FindArgs, OutputFormat, SourceArgs, TreeArgs, WatchArgs};
use crate::demo;

/// Load the tree the command should operate on.
fn load_tree(source: &SourceArgs, max_depth: Option<usize>) -> Result<UiTreeNode> {
    if let Some(path) = &source.json {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading snapshot from {}", path.display()))?;
        return UiTreeNode::from_json(&json).context("parsing snapshot JSON");
    }
    if source.demo {
        let demo = demo::build();
        return Ok(snapshot(&demo.desktop.root_element().node(), max_depth));
    }
    bail!("no tree source given; pass --json <file> or --demo");
}

pub fn handle_tree(args: TreeArgs) -> Result<()> {
    let tree = load_tree(&args.source, args.max_depth)?;
    debug!("loaded tree with {} nodes", tree.node_count());
    match args.format {
        OutputFormat::Compact => {
            let result = format_tree_as_compact_yaml(&tree);
            print!("{}", result.formatted);
            println!("({} indexed elements)", result.element_count);
        }
        OutputFormat::Json => {
            println!("{}", tree.to_json_pretty()?);
        }
    }
    Ok(())
}

pub fn handle_find(args: FindArgs) -> Result<()> {
    let tree = load_tree(&args.source, None)?;
    let mode: StringMatch = args.match_mode.into();

    let (property, expected) = if let Some(name) = &args.name {
        ("name", name.as_str())
    } else if let Some(id) = &args.automation_id {
        ("automation id", id.as_str())
    } else if let Some(class_name) = &args.class_name {
        ("class name", class_name.as_str())
    } else {
        bail!("nothing to match; pass --name, --automation-id or --class-name");
    };

    let mut matches = Vec::new();
    collect_matches(&tree, property, expected, mode, String::new(), &mut matches);

    if matches.is_empty() {
        println!("no elements where {property} {mode} \"{expected}\"");
        return Ok(());
    }
    for (path, node) in &matches {
        let attrs = &node.attributes;
        let name = attrs.name.as_deref().unwrap_or("");
        match &attrs.bounds {
            Some(b) => println!(
                "{path} [{role}] {name} (bounds: [{:.0}, {:.0}, {:.0}, {:.0}])",
                b.left,
                b.top,
                b.width,
                b.height,
                role = attrs.role,
            ),
            None => println!("{path} [{role}] {name}", role = attrs.role),
        }
    }
    println!("({} matches)", matches.len());
    Ok(())
}

/// Depth-first scan over the snapshot, accumulating slash-separated paths.
fn collect_matches<'a>(
    node: &'a UiTreeNode,
    property: &str,
    expected: &str,
    mode: StringMatch,
    path: String,
    matches: &mut Vec<(String, &'a UiTreeNode)>,
) {
    let attrs = &node.attributes;
    let label = attrs.name.as_deref().unwrap_or(&attrs.role);
    let path = if path.is_empty() {
        format!("/{label}")
    } else {
        format!("{path}/{label}")
    };

    let candidate = match property {
        "name" => attrs.name.as_deref(),
        "automation id" => attrs.automation_id.as_deref(),
        _ => attrs.class_name.as_deref(),
    };
    if candidate.map(|c| mode.matches(c, expected)).unwrap_or(false) {
        matches.push((path.clone(), node));
    }
    for child in &node.children {
        collect_matches(child, property, expected, mode, path.clone(), matches);
    }
}

pub fn handle_watch(args: WatchArgs) -> Result<()> {
    let demo = demo::build();
    let root = demo.desktop.root_element().node();
    let mut tick = 0u64;
    loop {
        tick += 1;
        // Nudge the demo so successive renders differ: the build progresses
        // and autosave flips.
        demo.progress
            .set_value(&format!("{}", (tick * 10).min(100)));
        if tick % 2 == 0 {
            demo.autosave.node().toggle()?;
        }

        let tree = snapshot(&root, None);
        let result = format_tree_as_compact_yaml(&tree);
        println!("--- tick {tick} ---");
        print!("{}", result.formatted);

        if args.ticks != 0 && tick >= args.ticks {
            return Ok(());
        }
        std::thread::sleep(Duration::from_millis(args.interval_ms));
    }
}
