use anyhow::bail;
use clap::Parser;
use harness_app::{Event, HarnessEditorViewModel, HarnessId, LoadState, PathPoint};
use math::margin::ManufacturingMargin;
use math::polyline::polyline_length;
use tracing::info;

use crate::opts::{HarnessCommand, Opts};
use crate::shell::Shell;
use crate::store::{HarnessStore, HttpStore};

mod opts;
mod shell;
mod store;

fn main() -> anyhow::Result<()> {
    let args = argfile::expand_args(argfile::parse_fromfile, argfile::PREFIX)?;

    let opts = Opts::parse_from(args);

    cli::tracing::configure_tracing(opts.trace.clone(), opts.verbose.clone())?;

    let store = HttpStore::new(&opts.base_url);

    match opts.command {
        HarnessCommand::Length {
            points,
            margin,
        } => {
            let margin = ManufacturingMargin::try_new(margin)?;
            let length = polyline_length(&points);

            println!("points: {}", points.len());
            println!("length: {:.3}", length);
            println!("length with margin: {:.3} (margin: {})", margin.apply(length), margin);
        }
        HarnessCommand::ExportUrl {
            harness,
            kind,
            scale,
        } => {
            let path = kind.to_export_kind(scale).path(&harness);
            println!("{}", store.url(&path));
        }
        HarnessCommand::Show {
            harness,
        } => {
            let mut shell = new_shell(store, opts.debounce_ms)?;
            fetch(&mut shell, &harness)?;

            print_harness(&shell.view());
        }
        HarnessCommand::Connect {
            harness,
            from,
            to,
        } => {
            let mut shell = new_shell(store, opts.debounce_ms)?;
            fetch(&mut shell, &harness)?;

            shell.dispatch(Event::Connect {
                source: from.node_id,
                source_handle: from.pin_id,
                target: to.node_id,
                target_handle: to.pin_id,
            })?;
            shell.run_until_idle()?;

            let view = shell.view();
            if let Some(edge) = view.edges.last() {
                println!(
                    "connected. edge: {}, wire: {}",
                    edge.id,
                    edge.data
                        .wire_id
                        .as_ref()
                        .map(|wire_id| wire_id.to_string())
                        .unwrap_or_default()
                );
            }
        }
        HarnessCommand::Route {
            harness,
            wire,
            points,
            margin,
        } => {
            let mut shell = new_shell(store, opts.debounce_ms)?;
            fetch(&mut shell, &harness)?;

            let Some(edge_id) = shell
                .view()
                .edges
                .iter()
                .find(|edge| edge.data.wire_id.as_ref() == Some(&wire))
                .map(|edge| edge.id.clone())
            else {
                bail!("Unknown wire. harness: {}, wire: {}", harness, wire)
            };

            shell.dispatch(Event::SetMargin {
                margin,
            })?;
            shell.dispatch(Event::SetSelectedEdge {
                edge_id: Some(edge_id.clone()),
            })?;
            shell.dispatch(Event::ClearPath)?;
            for point in points {
                shell.dispatch(Event::PickPathPoint {
                    point: PathPoint::from(point),
                })?;
            }
            shell.dispatch(Event::SavePath)?;
            shell.run_until_idle()?;

            let view = shell.view();
            let length = view
                .edges
                .iter()
                .find(|edge| edge.id == edge_id)
                .and_then(|edge| edge.data.length);
            match length {
                Some(length) => println!("routed. wire: {}, length: {:.3}", wire, length),
                None => println!("routed. wire: {}, length: unknown", wire),
            }
        }
        HarnessCommand::Components => {
            let mut shell = new_shell(store, opts.debounce_ms)?;
            shell.dispatch(Event::FetchComponents)?;

            for component in shell.view().library {
                let pins = component
                    .data
                    .pins
                    .iter()
                    .map(|pin| pin.id.to_string())
                    .collect::<Vec<_>>();
                println!(
                    "{} ({:?}) part number: {}, pins: {}",
                    component.name,
                    component.kind,
                    component
                        .data
                        .part_number
                        .as_deref()
                        .unwrap_or("-"),
                    pins.join(", ")
                );
            }
        }
    }

    Ok(())
}

fn new_shell<S: HarnessStore>(store: S, debounce_ms: u64) -> anyhow::Result<Shell<S>> {
    let mut shell = Shell::new(store);
    shell.dispatch(Event::ConfigureSync {
        quiescence_millis: debounce_ms,
    })?;
    Ok(shell)
}

fn fetch<S: HarnessStore>(shell: &mut Shell<S>, harness_id: &HarnessId) -> anyhow::Result<()> {
    shell.dispatch(Event::FetchHarness {
        harness_id: harness_id.clone(),
    })?;

    match shell.view().load_state {
        LoadState::Loaded {
            ..
        } => {
            info!("Loaded harness. harness: {}", harness_id);
            Ok(())
        }
        LoadState::Failed {
            message, ..
        } => bail!("Unable to load harness. harness: {}, cause: {}", harness_id, message),
        state => bail!("Harness not loaded. harness: {}, state: {:?}", harness_id, state),
    }
}

fn print_harness(view: &HarnessEditorViewModel) {
    if let Some(harness_id) = &view.harness_id {
        println!("harness: {}", harness_id);
    }

    for node in &view.nodes {
        let pins = node
            .data
            .pins
            .iter()
            .flatten()
            .map(|pin| pin.id.to_string())
            .collect::<Vec<_>>();
        println!("connector: {}, pins: {}", node.id, pins.join(", "));
    }

    for edge in &view.edges {
        println!(
            "wire: {}, from: {}:{}, to: {}:{}, color: {}, length: {}",
            edge.data
                .wire_id
                .as_ref()
                .map(|wire_id| wire_id.to_string())
                .unwrap_or_default(),
            edge.source,
            edge.source_handle,
            edge.target,
            edge.target_handle,
            edge.data
                .color
                .as_deref()
                .unwrap_or("-"),
            edge.data
                .length
                .map(|length| format!("{:.3}", length))
                .unwrap_or_else(|| "-".to_string()),
        );
    }
}
