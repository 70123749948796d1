pub mod packet_source;
