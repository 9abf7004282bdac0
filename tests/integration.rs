use dac8x68::{Channel, ClearCode, Command, Dac8x68, PowerMode, ReferenceMode, Resolution};
use embedded_hal_mock::eh1::digital::{Mock as PinMock, State, Transaction as PinTransaction};
use embedded_hal_mock::eh1::spi::{Mock as SpiMock, Transaction as SpiTransaction};

/// Expected bus and pin activity for a sequence of frames.
fn expect(frames: &[[u8; 4]]) -> (SpiMock<u8>, PinMock) {
    let mut spi = Vec::new();
    let mut pin = Vec::new();
    for frame in frames {
        spi.push(SpiTransaction::write_vec(frame.to_vec()));
        spi.push(SpiTransaction::flush());
        pin.push(PinTransaction::set(State::Low));
        pin.push(PinTransaction::set(State::High));
    }
    (SpiMock::new(&spi), PinMock::new(&pin))
}

fn done(dac: Dac8x68<SpiMock<u8>, PinMock>) {
    let (mut spi, mut sync) = dac.destroy();
    spi.done();
    sync.done();
}

#[test]
fn write_and_update_dac_a() {
    let (spi, sync) = expect(&[[0x03, 0x05, 0xFF, 0xF0]]);
    let mut dac = Dac8x68::new_dac8568(spi, sync);
    dac.write_and_update(Channel::DacA, 0x5FFF).unwrap();
    done(dac);
}

#[test]
fn write_input_dac_h() {
    let (spi, sync) = expect(&[[0x00, 0x7F, 0x00, 0xF0]]);
    let mut dac = Dac8x68::new_dac8568(spi, sync);
    dac.write_input(Channel::DacH, 0xF00F).unwrap();
    done(dac);
}

#[test]
fn write_all_channels_in_order() {
    let vals = [0x0000, 0x1111, 0x2222, 0x3333, 0x4444, 0x5555, 0x6666, 0x7777];
    let frames: Vec<[u8; 4]> = vals
        .iter()
        .enumerate()
        .map(|(n, &v)| {
            [
                0x00,
                ((n as u8) << 4) | (v >> 12) as u8,
                (v >> 4) as u8,
                ((v & 0x0F) as u8) << 4,
            ]
        })
        .collect();
    let (spi, sync) = expect(&frames);
    let mut dac = Dac8x68::new_dac8568(spi, sync);
    dac.write_all_channels(vals).unwrap();
    done(dac);
}

#[test]
fn update_all_channels_is_one_broadcast() {
    let (spi, sync) = expect(&[[0x01, 0xF0, 0x00, 0x00]]);
    let mut dac = Dac8x68::new_dac8568(spi, sync);
    dac.update_all_channels().unwrap();
    done(dac);
}

#[test]
fn update_single_channel() {
    let (spi, sync) = expect(&[[0x01, 0x40, 0x00, 0x00]]);
    let mut dac = Dac8x68::new_dac8568(spi, sync);
    dac.update(Channel::DacE).unwrap();
    done(dac);
}

#[test]
fn write_and_update_all() {
    let (spi, sync) = expect(&[[0x02, 0xFA, 0xBC, 0xD0]]);
    let mut dac = Dac8x68::new_dac8568(spi, sync);
    dac.write_and_update_all(0xABCD).unwrap();
    done(dac);
}

#[test]
fn lower_resolutions_clear_low_bits() {
    // 14 bit: DB5..DB4 are dropped
    let (spi, sync) = expect(&[[0x00, 0x2F, 0xFF, 0xC0]]);
    let mut dac = Dac8x68::new_dac8168(spi, sync);
    assert_eq!(dac.resolution(), Resolution::Bits14);
    dac.write_input(Channel::DacC, 0xFFFF).unwrap();
    done(dac);

    // 12 bit: the whole low nibble is dropped
    let (spi, sync) = expect(&[[0x03, 0x1A, 0xBC, 0x00]]);
    let mut dac = Dac8x68::new_dac7568(spi, sync);
    dac.write_and_update(Channel::DacB, 0xABCD).unwrap();
    done(dac);
}

#[test]
fn power_down_all_high_impedance() {
    let (spi, sync) = expect(&[[0x04, 0xF0, 0x03, 0x00], [0x04, 0x30, 0x00, 0x00]]);
    let mut dac = Dac8x68::new_dac8568(spi, sync);
    dac.set_power_mode(Channel::AllDacs, PowerMode::PowerDownHiZ)
        .unwrap();
    dac.set_power_mode(Channel::DacD, PowerMode::PowerUp).unwrap();
    done(dac);
}

#[test]
fn reference_static_then_flex() {
    let (spi, sync) = expect(&[
        [0x08, 0x00, 0x00, 0x01],
        [0x08, 0x18, 0x00, 0x00],
        [0x08, 0x1C, 0x00, 0x00],
    ]);
    let mut dac = Dac8x68::new_dac8568(spi, sync);
    dac.set_reference_mode(ReferenceMode::Enabled).unwrap();
    dac.set_reference_mode(ReferenceMode::FlexModeEnabled)
        .unwrap();
    dac.set_reference_mode(ReferenceMode::FlexAlwaysOff).unwrap();
    done(dac);
}

#[test]
fn flex_sub_mode_is_sent_without_flex_enable() {
    let (spi, sync) = expect(&[[0x08, 0x1A, 0x00, 0x00]]);
    let mut dac = Dac8x68::new_dac8568(spi, sync);
    dac.set_reference_mode(ReferenceMode::FlexAlwaysOn).unwrap();
    done(dac);
}

#[test]
fn clear_code_and_ldac() {
    let (spi, sync) = expect(&[[0x05, 0x00, 0x00, 0x04], [0x06, 0x00, 0x00, 0x0F]]);
    let mut dac = Dac8x68::new_dac8568(spi, sync);
    dac.set_clear_code(ClearCode::MidScale).unwrap();
    dac.set_ldac_mask(0b0000_1111).unwrap();
    done(dac);
}

#[test]
fn software_reset() {
    let (spi, sync) = expect(&[[0x07, 0x00, 0x00, 0x00]]);
    let mut dac = Dac8x68::new_dac8568(spi, sync);
    dac.software_reset().unwrap();
    done(dac);
}

#[test]
fn raw_frame_and_bytes_are_not_aligned() {
    let (spi, sync) = expect(&[[0x03, 0x0F, 0xFF, 0xF5], [0xDE, 0xAD, 0xBE, 0xEF]]);
    let mut dac = Dac8x68::new(spi, sync, Resolution::Bits12);
    dac.send_raw_frame(0x3, 0x0, 0xFFFF, 0x5).unwrap();
    dac.send_raw_bytes([0xDE, 0xAD, 0xBE, 0xEF]).unwrap();
    done(dac);
}

#[test]
fn send_aligns_data_commands() {
    let (spi, sync) = expect(&[
        [0x00, 0x0F, 0xFF, 0x00],
        [0x03, 0x6A, 0xBC, 0x00],
        [0x02, 0xFF, 0xFF, 0x00],
    ]);
    let mut dac = Dac8x68::new_dac7568(spi, sync);
    dac.send(Command::WriteInput {
        channel: Channel::DacA,
        value: 0xFFFF,
    })
    .unwrap();
    dac.send(Command::WriteInputUpdateOne {
        channel: Channel::DacG,
        value: 0xABCD,
    })
    .unwrap();
    dac.send(Command::WriteInputUpdateAll(0xFFFF)).unwrap();
    done(dac);
}
