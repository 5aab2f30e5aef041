use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use cli::parsers::{PinReference, PinReferenceParser, point3_parser};
use harness::api::ExportKind;
use harness::id::{HarnessId, WireId};
use nalgebra::Point3;

#[derive(Parser, Debug)]
#[command(name = "harness_cli")]
#[command(bin_name = "harness_cli")]
#[command(version, about, long_about = None)]
pub(crate) struct Opts {
    #[command(subcommand)]
    pub(crate) command: HarnessCommand,

    /// Base url of the harness API
    #[arg(long, env = "HARNESS_API_URL", default_value = "http://localhost:8000/api/v1")]
    pub(crate) base_url: String,

    /// Time without edits before changes are pushed
    #[arg(long, value_name = "MILLISECONDS", default_value_t = 500)]
    pub(crate) debounce_ms: u64,

    /// Trace log file
    #[arg(long, num_args = 0..=1, default_missing_value = "trace.log")]
    pub(crate) trace: Option<PathBuf>,

    #[command(flatten)]
    pub(crate) verbose: Verbosity<InfoLevel>,
}

#[derive(Debug, Subcommand)]
pub(crate) enum HarnessCommand {
    /// Show the connectors and wires of a harness
    Show {
        /// Harness id
        #[arg(long, value_name = "HARNESS_ID")]
        harness: HarnessId,
    },

    /// Connect two pins with a new wire
    Connect {
        /// Harness id
        #[arg(long, value_name = "HARNESS_ID")]
        harness: HarnessId,

        /// Source pin, e.g. 'CONN1:1'
        #[arg(long, value_parser = PinReferenceParser::default(), value_name = "CONNECTOR:PIN")]
        from: PinReference,

        /// Target pin, e.g. 'CONN2:1'
        #[arg(long, value_parser = PinReferenceParser::default(), value_name = "CONNECTOR:PIN")]
        to: PinReference,
    },

    /// Route a wire along a 3D path and save it
    Route {
        /// Harness id
        #[arg(long, value_name = "HARNESS_ID")]
        harness: HarnessId,

        /// Wire id
        #[arg(long, value_name = "WIRE_ID")]
        wire: WireId,

        /// Path point, repeat in path order, e.g. 'x=0,y=0,z=0'
        #[arg(long = "point", value_parser = point3_parser, required = true, value_name = "POINT")]
        points: Vec<Point3<f64>>,

        /// Manufacturing margin
        #[arg(long, default_value_t = 1.05)]
        margin: f64,
    },

    /// Compute the length of a path, does not contact the API
    Length {
        /// Path point, repeat in path order, e.g. 'x=0,y=0,z=0'
        #[arg(long = "point", value_parser = point3_parser, value_name = "POINT")]
        points: Vec<Point3<f64>>,

        /// Manufacturing margin
        #[arg(long, default_value_t = 1.05)]
        margin: f64,
    },

    /// Print the url of an export
    ExportUrl {
        /// Harness id
        #[arg(long, value_name = "HARNESS_ID")]
        harness: HarnessId,

        #[arg(value_enum)]
        kind: ExportKindArg,

        /// Jig scale, only used by 'jig-dxf'
        #[arg(long, default_value_t = 1.0)]
        scale: f64,
    },

    /// List the component library
    Components,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
pub(crate) enum ExportKindArg {
    StripList,
    MarkTubeList,
    FormboardPdf,
    JigDxf,
}

impl ExportKindArg {
    pub(crate) fn to_export_kind(self, scale: f64) -> ExportKind {
        match self {
            ExportKindArg::StripList => ExportKind::StripList,
            ExportKindArg::MarkTubeList => ExportKind::MarkTubeList,
            ExportKindArg::FormboardPdf => ExportKind::FormboardPdf,
            ExportKindArg::JigDxf => ExportKind::JigDxf {
                scale,
            },
        }
    }
}
