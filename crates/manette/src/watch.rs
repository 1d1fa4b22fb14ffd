use std::path::PathBuf;
use std::time::Duration;

use colored::Colorize;
use crossbeam_channel::unbounded;
use manette_gamepad::{
    locate, ButtonMask, ControllerEvent, DeviceIdentity, DevicePath, EventChannel, EventReceiver,
};

use crate::error::Error;
use crate::{print_debug, print_info, print_warning};

/// Upper bound on how long a Ctrl+C can go unnoticed.
const POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Owns the event channel and prints its signals until stopped.
pub(crate) fn run(identity: &DeviceIdentity, path: Option<PathBuf>) -> Result<(), Error> {
    let (stop_tx, stop_rx) = unbounded::<()>();
    ctrlc::set_handler(move || {
        let _ = stop_tx.send(());
    })?;

    let path = match path {
        Some(path) => DevicePath::new(path),
        None => locate(identity),
    };
    if path.is_empty() {
        return Err(Error::NotFound(identity.clone()));
    }

    let (mut channel, rx) = EventChannel::open(path);
    let mut held = ButtonMask::empty();
    print_info!("watching {}, Ctrl+C to stop", channel.device_path());

    let result = loop {
        report_all(&rx, &mut held);
        if stop_rx.try_recv().is_ok() {
            break Ok(());
        }
        if !channel.is_active() {
            break Err(Error::Unusable(channel.device_path().to_string()));
        }
        if let Some(drain) = channel.poll(POLL_TIMEOUT)? {
            print_debug!("drained {} records ({:?})", drain.records, drain.end);
        }
    };

    drop(channel);
    report_all(&rx, &mut held);
    result
}

fn report_all(rx: &EventReceiver, held: &mut ButtonMask) {
    for event in rx.try_iter() {
        report(event, held);
    }
}

fn report(event: ControllerEvent, held: &mut ButtonMask) {
    match event {
        ControllerEvent::Connected(name) => {
            print_info!("{} {name}", "connected".green());
        }
        ControllerEvent::Disconnected => {
            print_info!("{}", "disconnected".yellow());
        }
        ControllerEvent::ButtonChanged { button, pressed } => {
            held.set(button, pressed);
            let state = if pressed { "pressed" } else { "released" };
            print_info!("{:<5} {state:<8} held={:#06x}", button.name(), held.bits());
        }
        ControllerEvent::Error(message) => {
            print_warning!("{message}");
        }
    }
}
