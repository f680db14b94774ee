//! Line-oriented command scripts for driving a `Sculptor` headlessly.

use std::error::Error;
use std::fmt;

use isosculpt_edit::BrushMode;
use isosculpt_geom::Vec3;
use isosculpt_runtime::Sculptor;

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Seed(i32),
    Generate,
    Flatten(Option<f32>),
    Brush {
        at: Vec3,
        mode: BrushMode,
        radius: Option<f32>,
        strength: Option<f32>,
    },
    Stroke {
        hit: Vec3,
        dir: Vec3,
        mode: BrushMode,
        deep: bool,
    },
    Level(usize),
    Iso(f32),
    Radius(f32),
    Strength(f32),
    Stats,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ScriptError {
    UnknownCommand(String),
    MissingArg(&'static str),
    BadNumber { arg: &'static str, value: String },
    BadMode(String),
    TrailingArgs(String),
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::UnknownCommand(c) => write!(f, "unknown command '{c}'"),
            ScriptError::MissingArg(a) => write!(f, "missing argument <{a}>"),
            ScriptError::BadNumber { arg, value } => write!(f, "<{arg}>: '{value}' is not a number"),
            ScriptError::BadMode(m) => write!(f, "expected add|dig, got '{m}'"),
            ScriptError::TrailingArgs(rest) => write!(f, "unexpected trailing arguments '{rest}'"),
        }
    }
}

impl Error for ScriptError {}

struct Args<'a> {
    it: std::str::SplitWhitespace<'a>,
}

impl<'a> Args<'a> {
    fn next_str(&mut self, arg: &'static str) -> Result<&'a str, ScriptError> {
        self.it.next().ok_or(ScriptError::MissingArg(arg))
    }

    fn num<T: std::str::FromStr>(&mut self, arg: &'static str) -> Result<T, ScriptError> {
        let s = self.next_str(arg)?;
        s.parse().map_err(|_| ScriptError::BadNumber {
            arg,
            value: s.to_string(),
        })
    }

    fn opt_num<T: std::str::FromStr>(&mut self, arg: &'static str) -> Result<Option<T>, ScriptError> {
        match self.it.next() {
            None => Ok(None),
            Some(s) => s.parse().map(Some).map_err(|_| ScriptError::BadNumber {
                arg,
                value: s.to_string(),
            }),
        }
    }

    fn vec3(&mut self, names: [&'static str; 3]) -> Result<Vec3, ScriptError> {
        Ok(Vec3::new(self.num(names[0])?, self.num(names[1])?, self.num(names[2])?))
    }

    fn mode(&mut self) -> Result<BrushMode, ScriptError> {
        match self.next_str("add|dig")? {
            "add" => Ok(BrushMode::Add),
            "dig" => Ok(BrushMode::Dig),
            other => Err(ScriptError::BadMode(other.to_string())),
        }
    }

    fn finish(mut self) -> Result<(), ScriptError> {
        let rest: Vec<&str> = self.it.by_ref().collect();
        if rest.is_empty() {
            Ok(())
        } else {
            Err(ScriptError::TrailingArgs(rest.join(" ")))
        }
    }
}

/// Parses one script line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> Result<Option<Command>, ScriptError> {
    let line = line.split('#').next().unwrap_or("").trim();
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let mut a = Args { it: words };
    let cmd = match head {
        "seed" => Command::Seed(a.num("seed")?),
        "generate" => Command::Generate,
        "flatten" => Command::Flatten(a.opt_num("height")?),
        "brush" => Command::Brush {
            at: a.vec3(["x", "y", "z"])?,
            mode: a.mode()?,
            radius: a.opt_num("radius")?,
            strength: a.opt_num("strength")?,
        },
        "stroke" => {
            let hit = a.vec3(["hx", "hy", "hz"])?;
            let dir = a.vec3(["dx", "dy", "dz"])?;
            let mode = a.mode()?;
            let deep = match a.it.next() {
                None => false,
                Some("deep") => true,
                Some(other) => return Err(ScriptError::TrailingArgs(other.to_string())),
            };
            Command::Stroke {
                hit,
                dir,
                mode,
                deep,
            }
        }
        "level" => Command::Level(a.num("index")?),
        "iso" => Command::Iso(a.num("level")?),
        "radius" => Command::Radius(a.num("ticks")?),
        "strength" => Command::Strength(a.num("ticks")?),
        "stats" => Command::Stats,
        other => return Err(ScriptError::UnknownCommand(other.to_string())),
    };
    a.finish()?;
    Ok(Some(cmd))
}

/// One-line summary of the current mesh and grid.
pub fn stats_line(s: &Sculptor) -> String {
    let mesh = s.mesh();
    let st = s.stats();
    let [cx, cy, cz] = s.volume().cells();
    format!(
        "rev {} grid {}x{}x{} @ {} | {} verts {} tris | {}/{} active cells | y {:.3}..{:.3}",
        s.revision(),
        cx,
        cy,
        cz,
        s.volume().voxel_size(),
        mesh.vertex_count(),
        st.triangles,
        st.active_cells,
        st.cells,
        mesh.height_range.min,
        mesh.height_range.max
    )
}

pub fn execute(s: &mut Sculptor, cmd: &Command) -> Result<(), Box<dyn Error>> {
    match cmd {
        Command::Seed(seed) => {
            let n = *s.noise_params();
            s.generate_random(*seed, n.frequency, n.amplitude, n.octaves, n.cave_bias);
        }
        Command::Generate => s.regenerate(),
        Command::Flatten(Some(h)) => s.flatten(*h),
        Command::Flatten(None) => s.flatten_default(),
        Command::Brush {
            at,
            mode,
            radius,
            strength,
        } => {
            let b = *s.brush_settings();
            let fp = s.apply_brush(
                *at,
                radius.unwrap_or(b.radius),
                strength.unwrap_or(b.strength),
                mode.is_additive(),
            );
            log::info!("brush touched {} samples in {:?}", fp.touched, fp.bounds);
        }
        Command::Stroke {
            hit,
            dir,
            mode,
            deep,
        } => {
            let stroke = s.stroke(*hit, *dir, *mode, *deep);
            s.apply_stroke(&stroke);
        }
        Command::Level(i) => {
            s.set_density_level(*i);
        }
        Command::Iso(v) => s.set_iso_level(*v)?,
        Command::Radius(t) => {
            let r = s.brush_settings_mut().adjust_radius(*t);
            log::info!("brush radius {r}");
        }
        Command::Strength(t) => {
            let v = s.brush_settings_mut().adjust_strength(*t);
            log::info!("brush strength {v}");
        }
        Command::Stats => println!("{}", stats_line(s)),
    }
    Ok(())
}

/// Runs every line of `src`, stopping at the first failure.
pub fn run_script(s: &mut Sculptor, src: &str) -> Result<usize, Box<dyn Error>> {
    let mut ran = 0;
    for (n, line) in src.lines().enumerate() {
        let cmd = match parse_line(line) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => continue,
            Err(e) => return Err(format!("line {}: {}", n + 1, e).into()),
        };
        execute(s, &cmd).map_err(|e| format!("line {}: {}", n + 1, e))?;
        ran += 1;
    }
    Ok(ran)
}

#[cfg(test)]
mod tests {
    use super::*;
    use isosculpt_world::TerrainConfig;

    fn sculptor() -> Sculptor {
        let mut cfg = TerrainConfig::default();
        cfg.grid.size_x = 8;
        cfg.grid.size_y = 8;
        cfg.grid.size_z = 8;
        cfg.grid.voxel_size = 1.0;
        Sculptor::new(cfg).unwrap()
    }

    #[test]
    fn parses_every_command() {
        assert_eq!(parse_line("seed -12").unwrap(), Some(Command::Seed(-12)));
        assert_eq!(parse_line("  generate ").unwrap(), Some(Command::Generate));
        assert_eq!(parse_line("flatten").unwrap(), Some(Command::Flatten(None)));
        assert_eq!(parse_line("flatten 2.5").unwrap(), Some(Command::Flatten(Some(2.5))));
        assert_eq!(
            parse_line("brush 1 2 3 dig 4").unwrap(),
            Some(Command::Brush {
                at: Vec3::new(1.0, 2.0, 3.0),
                mode: BrushMode::Dig,
                radius: Some(4.0),
                strength: None,
            })
        );
        assert_eq!(
            parse_line("stroke 0 4 0 0 -1 0 add deep").unwrap(),
            Some(Command::Stroke {
                hit: Vec3::new(0.0, 4.0, 0.0),
                dir: Vec3::new(0.0, -1.0, 0.0),
                mode: BrushMode::Add,
                deep: true,
            })
        );
        assert_eq!(parse_line("level 2").unwrap(), Some(Command::Level(2)));
        assert_eq!(parse_line("iso 0.5").unwrap(), Some(Command::Iso(0.5)));
        assert_eq!(parse_line("radius -2").unwrap(), Some(Command::Radius(-2.0)));
        assert_eq!(parse_line("stats # trailing note").unwrap(), Some(Command::Stats));
        assert_eq!(parse_line("# comment").unwrap(), None);
        assert_eq!(parse_line("").unwrap(), None);
    }

    #[test]
    fn rejects_malformed_lines() {
        assert_eq!(
            parse_line("dance").unwrap_err(),
            ScriptError::UnknownCommand("dance".into())
        );
        assert_eq!(parse_line("seed").unwrap_err(), ScriptError::MissingArg("seed"));
        assert!(matches!(
            parse_line("brush 1 x 3 add").unwrap_err(),
            ScriptError::BadNumber { arg: "y", .. }
        ));
        assert_eq!(
            parse_line("brush 1 2 3 pour").unwrap_err(),
            ScriptError::BadMode("pour".into())
        );
        assert!(matches!(
            parse_line("stats now").unwrap_err(),
            ScriptError::TrailingArgs(_)
        ));
        assert!(matches!(
            parse_line("stroke 0 0 0 0 1 0 dig shallow").unwrap_err(),
            ScriptError::TrailingArgs(_)
        ));
    }

    #[test]
    fn script_drives_sculptor() {
        let mut s = sculptor();
        let src = "flatten 4\nbrush 4 4 4 add 2 1\n\nstroke 4 4 4 0 -1 0 dig\nstats\n";
        let ran = run_script(&mut s, src).unwrap();
        assert_eq!(ran, 4);
        assert!(!s.mesh().positions().is_empty());
    }

    #[test]
    fn script_errors_carry_line_numbers() {
        let mut s = sculptor();
        let err = run_script(&mut s, "flatten 1\nbogus\n").unwrap_err();
        assert_eq!(err.to_string(), "line 2: unknown command 'bogus'");
        let err = run_script(&mut s, "iso NaN").unwrap_err();
        assert!(err.to_string().starts_with("line 1: iso level must be finite"));
    }
}
