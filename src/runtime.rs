//! Control loop — the single consumer of the inbox.
//!
//! Each pass, in order:
//!
//! 1. drain every queued input into the service (commands) or the
//!    [`SampleAssembler`] (particulates), FIFO;
//! 2. if the sampling period has elapsed, read the climate sensor,
//!    assemble one sample and submit it (stored without a decision when a
//!    command already moved the window in step 1);
//! 3. tick the service so the pump cycle can expire.
//!
//! Nothing here sleeps; the caller paces [`ControlLoop::run_once`] at
//! the configured control interval.

use std::sync::Arc;

use log::{debug, trace, warn};

use crate::app::commands::Command;
use crate::app::context::Millis;
use crate::app::ports::{ActuatorPort, ClimatePort, EventSink};
use crate::app::service::{ControllerService, Disposition};
use crate::config::ControllerConfig;
use crate::events::{Inbound, Inbox};
use crate::sensors::{EnvironmentalSample, SampleAssembler};

/// What one pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PassReport {
    /// Inputs taken off the inbox.
    pub drained: usize,
    /// Commands that changed something.
    pub applied: usize,
    /// Sample submitted this pass, if one was due.
    pub sample: Option<EnvironmentalSample>,
    /// The pump cycle expired during this pass.
    pub pump_expired: bool,
}

pub struct ControlLoop<A: ActuatorPort, E: EventSink, C: ClimatePort> {
    service: ControllerService<A, E>,
    climate: C,
    assembler: SampleAssembler,
    inbox: Arc<Inbox>,
    sample_period_ms: Millis,
    next_sample_at: Millis,
}

impl<A: ActuatorPort, E: EventSink, C: ClimatePort> ControlLoop<A, E, C> {
    /// Wrap an already-started service. The first sample is taken on the
    /// first pass.
    pub fn new(
        config: &ControllerConfig,
        service: ControllerService<A, E>,
        climate: C,
        inbox: Arc<Inbox>,
    ) -> Self {
        Self {
            service,
            climate,
            assembler: SampleAssembler::new(),
            inbox,
            sample_period_ms: config.sample_period_ms,
            next_sample_at: 0,
        }
    }

    /// Run one pass at control-clock time `now_ms`.
    pub fn run_once(&mut self, now_ms: Millis) -> PassReport {
        let mut report = PassReport::default();

        let service = &mut self.service;
        let assembler = &mut self.assembler;
        let mut applied = 0;
        let mut window_moved = false;
        report.drained = self.inbox.drain(|item| match item {
            Inbound::Command(cmd) => {
                let before = service.read_actuator_state().window;
                if apply(service, cmd) {
                    applied += 1;
                }
                window_moved |= service.read_actuator_state().window != before;
            }
            Inbound::Particulate(update) => assembler.apply(update),
        });
        report.applied = applied;

        if now_ms >= self.next_sample_at {
            let climate = self.climate.read_climate();
            if let Err(e) = climate.complete() {
                warn!("Climate sensor: {}", e);
            }
            let sample = self.assembler.assemble(climate);
            trace!("Sample {:?}", sample);
            // A window moved by a command this pass is not moved again by
            // the Decision Rule in the same pass.
            if window_moved {
                self.service.record_sensor_sample(sample);
            } else {
                self.service.submit_sensor_sample(sample);
            }
            self.next_sample_at = now_ms.saturating_add(self.sample_period_ms);
            report.sample = Some(sample);
        }

        report.pump_expired = self.service.tick(now_ms) == Disposition::Applied;
        report
    }

    pub fn service(&self) -> &ControllerService<A, E> {
        &self.service
    }

    pub fn service_mut(&mut self) -> &mut ControllerService<A, E> {
        &mut self.service
    }

    pub fn assembler(&self) -> &SampleAssembler {
        &self.assembler
    }

    pub fn inbox(&self) -> &Arc<Inbox> {
        &self.inbox
    }
}

fn apply<A: ActuatorPort, E: EventSink>(service: &mut ControllerService<A, E>, cmd: Command) -> bool {
    let kind = cmd.kind;
    let outcome = service.submit_command(cmd);
    debug!("{:?} -> {:?}", kind, outcome);
    outcome == Disposition::Applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::hardware::HardwareAdapter;
    use crate::adapters::log_sink::LogEventSink;
    use crate::app::commands::{Channel, CommandKind};
    use crate::app::context::{PumpActivity, WindowPosition};
    use crate::drivers::pump::PumpDriver;
    use crate::drivers::window::WindowServo;
    use crate::sensors::ParticulateUpdate;
    use crate::sensors::climate::{ClimateInjector, ClimateSensor};

    fn rig() -> (
        ControlLoop<HardwareAdapter, LogEventSink, ClimateSensor>,
        ClimateInjector,
    ) {
        let config = ControllerConfig::default();
        let hw = HardwareAdapter::new(WindowServo::new(25), PumpDriver::new(33));
        let mut svc = ControllerService::new(&config, hw, LogEventSink::new());
        svc.start();
        let sensor = ClimateSensor::new(ClimateSensor::DEFAULT_ADDR);
        let injector = sensor.injector();
        let lp = ControlLoop::new(&config, svc, sensor, Arc::new(Inbox::new()));
        (lp, injector)
    }

    #[test]
    fn samples_once_per_period() {
        let (mut lp, injector) = rig();
        injector.set(22.0, 50.0);
        assert!(lp.run_once(0).sample.is_some());
        assert!(lp.run_once(200).sample.is_none());
        assert!(lp.run_once(999).sample.is_none());
        assert!(lp.run_once(1000).sample.is_some());
        assert_eq!(injector.read_count(), 2);
    }

    #[test]
    fn particulates_feed_the_next_sample() {
        let (mut lp, injector) = rig();
        injector.set(30.0, 60.0);
        lp.inbox()
            .push(Inbound::Particulate(ParticulateUpdate::Pm25(50.0)))
            .unwrap();
        let report = lp.run_once(0);
        assert_eq!(report.drained, 1);
        assert_eq!(report.sample.map(|s| s.pm25()), Some(50.0));
        assert_eq!(
            lp.service().read_actuator_state().window,
            WindowPosition::Closed
        );
    }

    #[test]
    fn queued_pump_command_expires_on_tick() {
        let (mut lp, _injector) = rig();
        lp.inbox()
            .push(Inbound::Command(Command::new(CommandKind::PumpOn, Channel::Http, 100)))
            .unwrap();
        let report = lp.run_once(100);
        assert_eq!(report.applied, 1);
        assert_eq!(
            lp.service().read_actuator_state().pump,
            PumpActivity::Active { since_ms: 100 }
        );
        assert!(!lp.run_once(3099).pump_expired);
        assert!(lp.run_once(3100).pump_expired);
        assert!(!lp.service().actuators().pump().is_running());
    }
}
