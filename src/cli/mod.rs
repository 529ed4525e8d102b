//! Interactive CLI front end: a line-based loop over stdin.
//!
//! Unlike the web front end, edits stay in memory until an explicit `save`.
//! Sibling pairs collected during the session feed the graph; whether they
//! survive the session is a store configuration choice.

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::config::Config;
use crate::error::Result;
use crate::extract::extract_relationships;
use crate::graph::{build_family_graph, render_dot};
use crate::store::{self, FamilyTree, SiblingPair};

/// Run the interactive loop until `exit` or end of input.
pub async fn run(config: &Config) -> Result<()> {
    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    let mut lines = stdin.lines();

    let mut tree = store::load(config.store_path())?;
    let mut siblings = if config.store.persist_siblings {
        store::load_siblings(config.store_path())?
    } else {
        Vec::new()
    };

    println!("Welcome to Family Tree Builder");
    println!("Type relationships like \"Abhay's father is Raj\".");
    println!("Type 'show tree' to visualize, 'save' to save data, or 'exit' to quit.");
    println!("Loaded {} saved records.", tree.len());

    loop {
        stdout.write_all(b"You: ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match line.trim().to_lowercase().as_str() {
            "exit" => {
                println!("Exiting Family Tree Builder. Goodbye!");
                break;
            }
            "save" => {
                store::save(config.store_path(), &tree)?;
                if config.store.persist_siblings {
                    store::save_siblings(config.store_path(), &siblings)?;
                }
                println!("Family tree saved successfully!");
            }
            "show tree" => {
                show_tree(config, &tree, &siblings)?;
            }
            _ => {
                handle_sentence(&line, &mut tree, &mut siblings);
            }
        }
    }

    Ok(())
}

/// Extract a relationship from one input line and apply it in memory.
fn handle_sentence(line: &str, tree: &mut FamilyTree, siblings: &mut Vec<SiblingPair>) {
    let Some(relation) = extract_relationships(line) else {
        println!("Could not understand the relationship. Try again.");
        return;
    };

    if let Some(pair) = relation.sibling_pair() {
        store::record_sibling(siblings, pair);
    }

    if let Some(child) = relation.child.clone() {
        store::upsert(
            tree,
            &child,
            relation.father.as_deref(),
            relation.mother.as_deref(),
        );
    }

    println!("Relationship added and stored in memory.");
}

/// Rebuild the graph from current state and print its DOT form; also writes
/// it next to the store file for use with Graphviz.
fn show_tree(config: &Config, tree: &FamilyTree, siblings: &[SiblingPair]) -> Result<()> {
    if tree.is_empty() && siblings.is_empty() {
        println!("No relationships added yet.");
        return Ok(());
    }

    let graph = build_family_graph(tree, siblings);
    let dot = render_dot(&graph);
    println!("{}", dot);

    let dot_path = config.store_path().with_extension("dot");
    std::fs::write(&dot_path, &dot)?;
    println!("DOT written to {} (render with: dot -Tpng)", dot_path.display());

    Ok(())
}
