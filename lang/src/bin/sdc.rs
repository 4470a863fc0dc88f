use siderite::document::{
    Document, SourceBuffer, StyledDocument, FOLD_LEVEL_HEADER_FLAG, FOLD_LEVEL_NUMBER_MASK,
};
use siderite::lexers::style_context::StyleCode;
use siderite::lexers::words::{BasicWordLists, CSharpWordLists};
use siderite::lexers::{basic, csharp};

const HELP: &str = "\
    sdc - the Siderite style and fold dumper

    USAGE:
        sdc [--lang LANG] [--dialect N] [--fold] [--quiet] FILENAME

    OPTIONS:
        --lang LANG         Which lexer to run. LANG is 'csharp' or 'basic'.
                            Defaults to 'csharp'.
        --dialect N         Basic dialect: 0 = modern .NET, 1 = classic,
                            2 = scripting. Defaults to 0.
        --fold              Also print per-line fold levels.
        --quiet             Suppress all non-error output (timing runs).

    ARGS:
        FILENAME            The path to the source file to highlight.
";

#[derive(Debug, Eq, PartialEq, Clone, Copy)]
enum Lang {
    CSharp,
    Basic,
}

#[derive(Debug)]
struct Args {
    lang: Lang,
    dialect: basic::Dialect,
    fold: bool,
    quiet: bool,
    source_file: std::path::PathBuf,
}

fn main() {
    let args = match parse_args() {
        Ok(args) => args,
        Err(err) => {
            eprintln!("Error: {}.", err);
            std::process::exit(1);
        }
    };

    let source = match SourceBuffer::new_from_file(&args.source_file) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("Error opening source file {}: {}", args.source_file.display(), err);
            std::process::exit(1);
        }
    };

    let mut doc = StyledDocument::new(&source);
    let length = doc.len();
    match args.lang {
        Lang::CSharp => {
            let words = CSharpWordLists::standard();
            csharp::lex(&mut doc, &words, 0, length, csharp::Style::Default);
            csharp::fold(&mut doc, 0, length, csharp::Style::Default);
        }
        Lang::Basic => {
            let words = BasicWordLists::standard();
            basic::lex(&mut doc, &words, args.dialect, 0, length, basic::Style::Default);
            basic::fold(&mut doc, 0, length, basic::Style::Default);
        }
    }

    if args.quiet {
        return;
    }

    println!("StyledDocument [");
    for (start, len, style) in doc.style_runs() {
        let text = doc.text_range(start, start + len);
        match args.lang {
            Lang::CSharp => {
                println!("  {:?} {:?}", csharp::Style::from_bits(style), text)
            }
            Lang::Basic => {
                println!("  {:?} {:?}", basic::Style::from_bits(style), text)
            }
        }
    }
    println!("]");

    if args.fold {
        println!("FoldLevels [");
        for line in 0..doc.line_count() {
            let lev = doc.fold_level(line);
            println!(
                "  {}: level {} next {}{}",
                line,
                lev & FOLD_LEVEL_NUMBER_MASK,
                (lev >> 16) & FOLD_LEVEL_NUMBER_MASK,
                if lev & FOLD_LEVEL_HEADER_FLAG != 0 { " header" } else { "" },
            );
        }
        println!("]");
    }
}

fn parse_args() -> Result<Args, pico_args::Error> {
    let mut pargs = pico_args::Arguments::from_env();

    if pargs.contains(["-h", "--help"]) {
        print!("{}", HELP);
        std::process::exit(0);
    }

    let args = Args {
        lang: pargs.opt_value_from_fn("--lang", parse_lang)?.unwrap_or(Lang::CSharp),
        dialect: basic::Dialect::from_property(
            pargs.opt_value_from_str("--dialect")?.unwrap_or(0),
        ),
        fold: pargs.contains("--fold"),
        quiet: pargs.contains("--quiet"),
        source_file: pargs.free_from_str()?,
    };

    let remaining = pargs.finish();
    if !remaining.is_empty() {
        eprintln!("Error: unused arguments left: {:?}.", remaining);
        std::process::exit(1);
    }
    Ok(args)
}

fn parse_lang(value: &str) -> Result<Lang, &'static str> {
    match value {
        "csharp" => Ok(Lang::CSharp),
        "basic" => Ok(Lang::Basic),
        _ => Err("unrecognized language."),
    }
}
