//! Ethernet/IPv4/TCP segment decoding.

use std::net::Ipv4Addr;

use etherparse::{Ethernet2HeaderSlice, Ipv4HeaderSlice, TcpHeaderSlice};

use crate::pcap::RawFrame;

/// EtherType for IPv4.
pub const ETHERTYPE_IPV4: u16 = 0x0800;

/// IP protocol number for TCP.
pub const IP_PROTO_TCP: u8 = 6;

/// One direction of a TCP connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlowKey {
    pub src_ip: Ipv4Addr,
    pub src_port: u16,
    pub dst_ip: Ipv4Addr,
    pub dst_port: u16,
}

/// A decoded TCP segment with a non-empty payload.
#[derive(Debug, Clone)]
pub struct SegmentDescriptor {
    pub flow: FlowKey,
    pub seq: u32,
    pub payload: Vec<u8>,
}

/// Decode one link-layer frame into a TCP segment descriptor.
///
/// Each decoding step is a validity gate that yields `None` on failure;
/// a frame that is not a well-formed IPv4/TCP segment carrying payload
/// is simply not relevant.
pub fn decode_segment(frame: &RawFrame) -> Option<SegmentDescriptor> {
    let data = frame.data.as_slice();

    let eth = Ethernet2HeaderSlice::from_slice(data).ok()?;
    if eth.ether_type().0 != ETHERTYPE_IPV4 {
        return None;
    }

    let ip_bytes = &data[eth.slice().len()..];
    let ip = Ipv4HeaderSlice::from_slice(ip_bytes).ok()?;
    let header_len = ip.slice().len();
    let total_len = usize::from(ip.total_len());
    if total_len < header_len || total_len > ip_bytes.len() {
        return None;
    }
    if ip.protocol().0 != IP_PROTO_TCP {
        return None;
    }

    // Slice to the declared total length so Ethernet trailer padding
    // never leaks into the payload.
    let tcp_bytes = &ip_bytes[header_len..total_len];
    let tcp = TcpHeaderSlice::from_slice(tcp_bytes).ok()?;
    let payload = &tcp_bytes[tcp.slice().len()..];
    if payload.is_empty() {
        return None;
    }

    Some(SegmentDescriptor {
        flow: FlowKey {
            src_ip: Ipv4Addr::from(ip.source()),
            src_port: tcp.source_port(),
            dst_ip: Ipv4Addr::from(ip.destination()),
            dst_port: tcp.destination_port(),
        },
        seq: tcp.sequence_number(),
        payload: payload.to_vec(),
    })
}
