/* Command-line front end for the waveform generator.

   16 chans 32 bit, +11.5 degrees phase offset per channel:
     wavegen --nchan=16 --dsize=4 --phase=+11.5 --save=1

   3 chans, a different wave function on each:
     wavegen --nchan=3 --wave=SINE:1/RAMP:2/SQUARE:3 --save=test

   channels spaced apart in voltage and time:
     wavegen --nchan=8 --dsize=2 --voltage=10 --offset=+-7:7,2 --scale=0.05 \
             --totallength=300000 --spos=+0,40000 --wavelength=10000 --save=1
*/

#[cfg(feature = "cli")]
mod cli {
    use std::path::PathBuf;

    use anyhow::{Context, Result};
    use clap::Parser;
    use wavegen::utils::{init_logger, level_for};
    use wavegen::{BufferWriter, OutputBuffer, SaveId, WaveConfig, WaveGen};

    /// Generate interleaved multi-channel waveform data
    #[derive(Parser, Debug)]
    #[command(name = "wavegen")]
    #[command(version)]
    pub struct Args {
        /// Total channels
        #[arg(long, default_value_t = 8)]
        nchan: usize,

        /// Cycles in waveform
        #[arg(long, default_value_t = 1)]
        cycles: u32,

        /// Wavelength in samples (comma list or +accumulate)
        #[arg(long, default_value = "20000", allow_hyphen_values = true)]
        wavelength: String,

        /// Total channel length override
        #[arg(long)]
        totallength: Option<usize>,

        /// Data size: 2 or 16, 4 or 32
        #[arg(long, default_value_t = 2)]
        dsize: u32,

        /// Max voltage
        #[arg(long, default_value_t = 10.0, allow_hyphen_values = true)]
        voltage: f64,

        /// Wave function and targeted channels (SINE:1,2,3,4/RAMP:5-8)
        #[arg(long, default_value = "SINE:ALL")]
        wave: String,

        /// Scale waveforms (-0.125 or 1,0.8,0.6)
        #[arg(long, default_value = "1", allow_hyphen_values = true)]
        scale: String,

        /// Phase in degrees (45 or +45 or 45,90,135,180)
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        phase: String,

        /// Voltage offset
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        offset: String,

        /// Start position to insert waveform
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        spos: String,

        /// Crop waveform by x samples
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        crop: String,

        /// Save: 1 names the file by timestamp, anything else is used as the id
        #[arg(long)]
        save: Option<String>,

        /// Directory the data file is written to
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,

        /// Also bounce the buffer to a WAV file
        #[cfg(feature = "bounce")]
        #[arg(long)]
        wav: Option<PathBuf>,

        /// Sample rate stamped into the bounced WAV
        #[cfg(feature = "bounce")]
        #[arg(long, default_value_t = 48000)]
        wav_rate: u32,

        /// Hush progress output
        #[arg(long, default_value_t = 0)]
        hush: u8,
    }

    impl Args {
        fn to_config(&self) -> WaveConfig {
            WaveConfig {
                nchan: self.nchan,
                cycles: self.cycles,
                wavelength: self.wavelength.clone(),
                total_length: self.totallength,
                dsize: self.dsize,
                wave: self.wave.clone(),
                phase: self.phase.clone(),
                scale: self.scale.clone(),
                crop: self.crop.clone(),
                spos: self.spos.clone(),
                voltage: self.voltage,
                offset: self.offset.clone(),
            }
        }
    }

    pub fn run() -> Result<()> {
        let args = Args::parse();
        init_logger(level_for(args.hush != 0));

        let mut engine =
            WaveGen::new(&args.to_config()).context("Invalid waveform configuration")?;
        let buffer = engine.generate();

        bounce(&args, &buffer)?;

        match args.save.as_deref() {
            None | Some("0") => {}
            Some(flag) => {
                BufferWriter::new(&args.out_dir).save(&buffer, &SaveId::from_flag(flag))?;
            }
        }

        Ok(())
    }

    #[cfg(feature = "bounce")]
    fn bounce(args: &Args, buffer: &OutputBuffer) -> Result<()> {
        match &args.wav {
            Some(path) => wavegen::output::bounce_wav(buffer, path, args.wav_rate),
            None => Ok(()),
        }
    }

    #[cfg(not(feature = "bounce"))]
    fn bounce(_args: &Args, _buffer: &OutputBuffer) -> Result<()> {
        Ok(())
    }
}

#[cfg(feature = "cli")]
fn main() -> anyhow::Result<()> {
    cli::run()
}

#[cfg(not(feature = "cli"))]
fn main() {
    println!("This binary is only available with the 'cli' feature enabled.");
}
